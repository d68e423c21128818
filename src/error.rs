//! # Error Types
//!
//! This module defines the error type shared by the population engine and its
//! collaborators. Errors raised by a fitness metric travel through the
//! population operators untouched, so the driver of a search can decide how to
//! penalise or discard a candidate that failed to evaluate.
//!
//! Broken preconditions (mixing populations scored by different metrics,
//! selections producing out-of-range indices) are not represented here: they
//! are integration bugs and abort with a panic.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use phaser::error::{PhaserError, Result};
//!
//! fn evaluate(cost: f64) -> Result<f64> {
//!     if cost.is_finite() {
//!         Ok(cost)
//!     } else {
//!         Err(PhaserError::InvalidNumericValue(cost.to_string()))
//!     }
//! }
//!
//! assert!(evaluate(3.0).is_ok());
//! assert!(evaluate(f64::NAN).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use phaser::error::{Result, ResultExt};
//!
//! fn parse_cost(raw: &str) -> Result<u64> {
//!     raw.trim().parse::<u64>().context("Failed to parse program cost")
//! }
//!
//! assert_eq!(parse_cost(" 42 ").unwrap(), 42);
//! assert!(parse_cost("forty-two").is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use phaser::error::{PhaserError, OptionExt};
//!
//! fn cheapest(costs: &[u64]) -> phaser::error::Result<u64> {
//!     costs.iter().min().cloned().ok_or_else_phaser(||
//!         PhaserError::Other("no costs recorded".to_string())
//!     )
//! }
//!
//! assert_eq!(cheapest(&[7, 3, 9]).unwrap(), 3);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while building or transforming populations.
#[derive(Error, Debug)]
pub enum PhaserError {
    /// A fitness metric failed to produce a cost for a chromosome.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A fitness metric produced NaN or an infinite cost.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A chromosome contains a gene that does not name any optimisation step.
    #[error("Invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for population operations.
pub type Result<T> = std::result::Result<T, PhaserError>;

/// Extension trait for Result to add context to errors.
///
/// Any standard error is turned into `PhaserError::Other` carrying both the
/// context and the original message.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| PhaserError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result, generating the error lazily.
    fn ok_or_else_phaser<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> PhaserError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_phaser<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> PhaserError,
    {
        self.ok_or_else(err_fn)
    }
}
