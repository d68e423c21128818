/// Picks indices into a population for single-parent operations.
///
/// # Examples
///
/// ```
/// use phaser::selection::{RangeSelection, Selection};
///
/// let selection = RangeSelection::new(0.0, 0.5).unwrap();
/// assert_eq!(selection.materialise(6), vec![0, 1, 2]);
///
/// let every_other = |population_size: usize| -> Vec<usize> {
///     (0..population_size).step_by(2).collect()
/// };
/// assert_eq!(every_other.materialise(5), vec![0, 2, 4]);
/// ```
pub trait Selection {
    /// Produces the selected indices for a population of `population_size`.
    ///
    /// Every index must be below `population_size`. Indices may repeat.
    fn materialise(&self, population_size: usize) -> Vec<usize>;
}

impl<F> Selection for F
where
    F: Fn(usize) -> Vec<usize>,
{
    fn materialise(&self, population_size: usize) -> Vec<usize> {
        self(population_size)
    }
}

/// Picks pairs of indices into a population for two-parent operations.
///
/// Every pair must consist of two different indices below the population
/// size. Pairs may repeat and an index may appear in many pairs.
pub trait PairSelection {
    /// Produces the selected pairs for a population of `population_size`.
    fn materialise(&self, population_size: usize) -> Vec<(usize, usize)>;
}

impl<F> PairSelection for F
where
    F: Fn(usize) -> Vec<(usize, usize)>,
{
    fn materialise(&self, population_size: usize) -> Vec<(usize, usize)> {
        self(population_size)
    }
}
