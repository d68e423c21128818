//! # PopulationOptions
//!
//! The `PopulationOptions` struct holds the parameters used to seed the first
//! generation of a search: how many individuals to create, the range their
//! chromosome lengths are drawn from, and the batch size from which
//! side-effect free metrics are evaluated in parallel.
//!
//! ## Example
//!
//! ```rust
//! use phaser::population::PopulationOptions;
//!
//! // Create a new PopulationOptions instance with custom parameters
//! let custom_options = PopulationOptions::new(50, 10, 40).unwrap();
//!
//! // Or use the builder
//! let built = PopulationOptions::builder()
//!     .population_size(50)
//!     .min_chromosome_length(10)
//!     .max_chromosome_length(40)
//!     .parallel_threshold(200)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(custom_options.get_population_size(), built.get_population_size());
//! ```

use crate::error::{PhaserError, Result};
use crate::population::evaluation::DEFAULT_PARALLEL_THRESHOLD;

const DEFAULT_POPULATION_SIZE: usize = 20;
const DEFAULT_MIN_CHROMOSOME_LENGTH: usize = 12;
const DEFAULT_MAX_CHROMOSOME_LENGTH: usize = 30;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationOptions {
    population_size: usize,
    min_chromosome_length: usize,
    max_chromosome_length: usize,
    /// Minimum batch size evaluated on the rayon thread pool
    parallel_threshold: usize,
}

impl PopulationOptions {
    /// Creates options for a population of `population_size` individuals with
    /// chromosome lengths drawn from `[min_chromosome_length, max_chromosome_length]`.
    ///
    /// # Errors
    ///
    /// Returns `PhaserError::Configuration` if the population size is zero or
    /// the minimum length exceeds the maximum.
    pub fn new(
        population_size: usize,
        min_chromosome_length: usize,
        max_chromosome_length: usize,
    ) -> Result<Self> {
        let options = Self {
            population_size,
            min_chromosome_length,
            max_chromosome_length,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options describe a population that can be generated.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(PhaserError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.min_chromosome_length > self.max_chromosome_length {
            return Err(PhaserError::Configuration(format!(
                "Minimum chromosome length ({}) exceeds maximum ({})",
                self.min_chromosome_length, self.max_chromosome_length
            )));
        }

        Ok(())
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_min_chromosome_length(&self) -> usize {
        self.min_chromosome_length
    }

    pub fn get_max_chromosome_length(&self) -> usize {
        self.max_chromosome_length
    }

    /// Returns the minimum batch size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the chromosome length range.
    pub fn set_chromosome_lengths(&mut self, min: usize, max: usize) {
        self.min_chromosome_length = min;
        self.max_chromosome_length = max;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating a `PopulationOptions` instance.
    pub fn builder() -> PopulationOptionsBuilder {
        PopulationOptionsBuilder::default()
    }
}

impl Default for PopulationOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            min_chromosome_length: DEFAULT_MIN_CHROMOSOME_LENGTH,
            max_chromosome_length: DEFAULT_MAX_CHROMOSOME_LENGTH,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `PopulationOptions`.
///
/// Unset fields fall back to the defaults of `PopulationOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct PopulationOptionsBuilder {
    population_size: Option<usize>,
    min_chromosome_length: Option<usize>,
    max_chromosome_length: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl PopulationOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn min_chromosome_length(mut self, value: usize) -> Self {
        self.min_chromosome_length = Some(value);
        self
    }

    pub fn max_chromosome_length(mut self, value: usize) -> Self {
        self.max_chromosome_length = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds and validates the `PopulationOptions` instance.
    pub fn build(self) -> Result<PopulationOptions> {
        let options = PopulationOptions {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            min_chromosome_length: self
                .min_chromosome_length
                .unwrap_or(DEFAULT_MIN_CHROMOSOME_LENGTH),
            max_chromosome_length: self
                .max_chromosome_length
                .unwrap_or(DEFAULT_MAX_CHROMOSOME_LENGTH),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        };
        options.validate()?;
        Ok(options)
    }
}
