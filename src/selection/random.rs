use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::rng::{RandomNumberGenerator, ThreadLocalRng};
use crate::selection::selection_strategy::Selection;
use crate::selection::{selection_count, validate_selection_size};

/// Selects indices uniformly at random, with replacement.
///
/// `round(selection_size * n)` indices are drawn, so a size above `1.0` grows
/// the population and one below shrinks it.
///
/// # Examples
///
/// ```
/// use phaser::selection::{RandomSelection, Selection};
///
/// let selection = RandomSelection::with_seed(0.5, 42).unwrap();
/// let indices = selection.materialise(10);
///
/// assert_eq!(indices.len(), 5);
/// assert!(indices.iter().all(|&i| i < 10));
/// ```
#[derive(Debug)]
pub struct RandomSelection {
    selection_size: f64,
    rng: Mutex<RandomNumberGenerator>,
}

impl RandomSelection {
    /// Creates a new `RandomSelection` seeded from thread-local entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if `selection_size` is negative or not finite.
    pub fn new(selection_size: f64) -> Result<Self> {
        validate_selection_size(selection_size)?;
        Ok(Self {
            selection_size,
            rng: Mutex::new(ThreadLocalRng::fork()),
        })
    }

    /// Creates a new `RandomSelection` whose draws are reproducible.
    pub fn with_seed(selection_size: f64, seed: u64) -> Result<Self> {
        validate_selection_size(selection_size)?;
        Ok(Self {
            selection_size,
            rng: Mutex::new(RandomNumberGenerator::from_seed(seed)),
        })
    }

    pub fn selection_size(&self) -> f64 {
        self.selection_size
    }
}

impl Selection for RandomSelection {
    fn materialise(&self, population_size: usize) -> Vec<usize> {
        if population_size == 0 {
            return Vec::new();
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..selection_count(population_size, self.selection_size))
            .map(|_| rng.index(population_size))
            .collect()
    }
}
