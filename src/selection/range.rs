use crate::error::{PhaserError, Result};
use crate::selection::selection_strategy::Selection;

/// Selects a contiguous slice of the population.
///
/// The bounds are fractions of the population size: for `n` individuals the
/// indices `floor(start * n)` up to, but excluding, `floor(end * n)` are
/// returned in ascending order. Applied to a sorted population this keeps the
/// fittest (or least fit) part of it.
///
/// # Examples
///
/// ```
/// use phaser::selection::{RangeSelection, Selection};
///
/// let top_quarter = RangeSelection::new(0.0, 0.25).unwrap();
/// assert_eq!(top_quarter.materialise(8), vec![0, 1]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    start: f64,
    end: f64,
}

impl RangeSelection {
    /// Creates a new `RangeSelection` covering `[start, end)` of the population.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 <= start <= end <= 1`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) {
            return Err(PhaserError::Configuration(format!(
                "Range bounds must lie in [0, 1], got [{}, {})",
                start, end
            )));
        }
        if start > end {
            return Err(PhaserError::Configuration(format!(
                "Range start {} is past its end {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

impl Default for RangeSelection {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }
}

impl Selection for RangeSelection {
    fn materialise(&self, population_size: usize) -> Vec<usize> {
        let begin = (self.start * population_size as f64) as usize;
        let end = (self.end * population_size as f64) as usize;

        (begin..end.min(population_size)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range() {
        let selection = RangeSelection::default();
        assert_eq!(selection.materialise(4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_partial_range_floors_bounds() {
        let selection = RangeSelection::new(0.25, 0.75).unwrap();
        assert_eq!(selection.materialise(10), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_population() {
        let selection = RangeSelection::new(0.1, 0.9).unwrap();
        assert!(selection.materialise(0).is_empty());
    }

    #[test]
    fn test_empty_range() {
        let selection = RangeSelection::new(0.5, 0.5).unwrap();
        assert!(selection.materialise(10).is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(RangeSelection::new(-0.1, 0.5).is_err());
        assert!(RangeSelection::new(0.0, 1.1).is_err());
        assert!(RangeSelection::new(0.6, 0.5).is_err());
    }
}
