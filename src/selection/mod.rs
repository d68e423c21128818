//! # Selections
//!
//! Selections decide which individuals an operator works on. A [`Selection`]
//! maps a population size to a sequence of indices, a [`PairSelection`] to a
//! sequence of index pairs. Indices may repeat and the number returned need
//! not match the population size.
//!
//! The strategies here are mechanical: they pick positions by pattern or
//! uniformly at random, without looking at fitness. Any closure with the right
//! signature is a selection too.
pub mod mosaic;
pub mod pairs;
pub mod random;
pub mod range;
pub mod selection_strategy;

pub use mosaic::MosaicSelection;
pub use pairs::{PairMosaicSelection, RandomPairSelection};
pub use random::RandomSelection;
pub use range::RangeSelection;
pub use selection_strategy::{PairSelection, Selection};

use crate::error::{PhaserError, Result};

/// Number of picks a strategy makes for `population_size` individuals.
pub(crate) fn selection_count(population_size: usize, selection_size: f64) -> usize {
    (population_size as f64 * selection_size).round() as usize
}

pub(crate) fn validate_selection_size(selection_size: f64) -> Result<()> {
    if !selection_size.is_finite() || selection_size < 0.0 {
        return Err(PhaserError::Configuration(format!(
            "Selection size must be a non-negative number, got {}",
            selection_size
        )));
    }
    Ok(())
}
