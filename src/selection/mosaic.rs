use crate::error::{PhaserError, Result};
use crate::selection::selection_strategy::Selection;
use crate::selection::{selection_count, validate_selection_size};

/// Selects indices by repeating a fixed pattern.
///
/// `round(selection_size * n)` indices are produced by cycling through the
/// pattern. Pattern entries past the end of the population are clamped to the
/// last index, so the same pattern works for any non-empty population.
///
/// # Examples
///
/// ```
/// use phaser::selection::{MosaicSelection, Selection};
///
/// let selection = MosaicSelection::new(vec![0, 5, 1], 1.0).unwrap();
/// assert_eq!(selection.materialise(4), vec![0, 3, 1, 0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicSelection {
    pattern: Vec<usize>,
    selection_size: f64,
}

impl MosaicSelection {
    /// Creates a new `MosaicSelection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or `selection_size` is
    /// negative or not finite.
    pub fn new(pattern: Vec<usize>, selection_size: f64) -> Result<Self> {
        if pattern.is_empty() {
            return Err(PhaserError::Configuration(
                "Mosaic pattern cannot be empty".to_string(),
            ));
        }
        validate_selection_size(selection_size)?;

        Ok(Self {
            pattern,
            selection_size,
        })
    }
}

impl Selection for MosaicSelection {
    fn materialise(&self, population_size: usize) -> Vec<usize> {
        if population_size == 0 {
            return Vec::new();
        }

        self.pattern
            .iter()
            .cycle()
            .take(selection_count(population_size, self.selection_size))
            .map(|&index| index.min(population_size - 1))
            .collect()
    }
}
