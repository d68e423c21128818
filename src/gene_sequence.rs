//! # GeneSequence Trait
//!
//! The `GeneSequence` trait is the capability surface the population engine
//! needs from a candidate solution: its length, a total order used to break
//! ties between equally fit candidates, random generation and a textual form.
//! Everything else about the representation stays with the implementor.
//!
//! ## Example
//!
//! ```rust
//! use phaser::gene_sequence::GeneSequence;
//! use phaser::rng::RandomNumberGenerator;
//! use std::fmt;
//!
//! #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! struct Bits(Vec<bool>);
//!
//! impl fmt::Display for Bits {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         for bit in &self.0 {
//!             write!(f, "{}", if *bit { '1' } else { '0' })?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl GeneSequence for Bits {
//!     fn length(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
//!         Bits((0..length).map(|_| rng.chance(0.5)).collect())
//!     }
//! }
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! assert_eq!(Bits::random(8, &mut rng).length(), 8);
//! ```

use std::fmt::{Debug, Display};

use crate::rng::RandomNumberGenerator;

/// Trait for types that represent a candidate sequence of genes.
///
/// The `Ord` implementation must compare the genes lexicographically; the
/// population engine relies on it as the last tie-breaker when ranking
/// individuals, after fitness and length.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync` so populations can be copied between generations and evaluated
/// on the rayon thread pool.
pub trait GeneSequence: Clone + Debug + Display + Ord + Send + Sync {
    /// Returns the number of genes in the sequence.
    fn length(&self) -> usize;

    /// Produces a random sequence with exactly `length` genes.
    fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self;
}
