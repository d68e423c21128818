use std::sync::{Mutex, PoisonError};

use crate::error::{PhaserError, Result};
use crate::rng::{RandomNumberGenerator, ThreadLocalRng};
use crate::selection::selection_strategy::PairSelection;
use crate::selection::{selection_count, validate_selection_size};

/// Selects pairs of distinct indices uniformly at random.
///
/// `round(selection_size * n)` pairs are drawn. Populations with fewer than
/// two individuals yield no pairs.
///
/// # Examples
///
/// ```
/// use phaser::selection::{PairSelection, RandomPairSelection};
///
/// let selection = RandomPairSelection::with_seed(0.5, 3).unwrap();
/// let pairs = selection.materialise(6);
///
/// assert_eq!(pairs.len(), 3);
/// assert!(pairs.iter().all(|&(i, j)| i != j && i < 6 && j < 6));
/// ```
#[derive(Debug)]
pub struct RandomPairSelection {
    selection_size: f64,
    rng: Mutex<RandomNumberGenerator>,
}

impl RandomPairSelection {
    /// Creates a new `RandomPairSelection` seeded from thread-local entropy.
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

    /// Creates a new `RandomPairSelection` whose draws are reproducible.
    pub fn with_seed(selection_size: f64, seed: u64) -> Result<Self> {
        validate_selection_size(selection_size)?;
        Ok(Self {
            selection_size,
            rng: Mutex::new(RandomNumberGenerator::from_seed(seed)),
        })
    }
}

impl PairSelection for RandomPairSelection {
    fn materialise(&self, population_size: usize) -> Vec<(usize, usize)> {
        if population_size < 2 {
            return Vec::new();
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..selection_count(population_size, self.selection_size))
            .map(|_| {
                let first = rng.index(population_size);
                // Draw from the other n - 1 indices and skip over `first`.
                let mut second = rng.index(population_size - 1);
                if second >= first {
                    second += 1;
                }
                (first, second)
            })
            .collect()
    }
}

/// Selects pairs by repeating a fixed pattern of pairs.
///
/// Indices past the end of the population are clamped to the last index. If
/// clamping makes both halves of a pair equal, the second becomes the index
/// after the first, wrapping around.
///
/// # Examples
///
/// ```
/// use phaser::selection::{PairMosaicSelection, PairSelection};
///
/// let selection = PairMosaicSelection::new(vec![(0, 1), (4, 5)], 1.0).unwrap();
/// assert_eq!(selection.materialise(3), vec![(0, 1), (2, 0), (0, 1)]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PairMosaicSelection {
    pattern: Vec<(usize, usize)>,
    selection_size: f64,
}

impl PairMosaicSelection {
    /// Creates a new `PairMosaicSelection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty, contains a pair of equal
    /// indices, or `selection_size` is negative or not finite.
    pub fn new(pattern: Vec<(usize, usize)>, selection_size: f64) -> Result<Self> {
        if pattern.is_empty() {
            return Err(PhaserError::Configuration(
                "Pair mosaic pattern cannot be empty".to_string(),
            ));
        }
        if let Some((i, _)) = pattern.iter().find(|(i, j)| i == j) {
            return Err(PhaserError::Configuration(format!(
                "Pair mosaic pattern pairs index {} with itself",
                i
            )));
        }
        validate_selection_size(selection_size)?;

        Ok(Self {
            pattern,
            selection_size,
        })
    }
}

impl PairSelection for PairMosaicSelection {
    fn materialise(&self, population_size: usize) -> Vec<(usize, usize)> {
        if population_size < 2 {
            return Vec::new();
        }

        let last = population_size - 1;
        self.pattern
            .iter()
            .cycle()
            .take(selection_count(population_size, self.selection_size))
            .map(|&(i, j)| {
                let first = i.min(last);
                let mut second = j.min(last);
                if second == first {
                    second = (first + 1) % population_size;
                }
                (first, second)
            })
            .collect()
    }
}
