//! # Fitness Metrics
//!
//! A fitness metric maps a gene sequence to a cost; lower is better. How the
//! cost is obtained (compiling and running the optimised program, counting
//! code size, ...) is up to the implementor.
//!
//! Populations hold their metric through a [`SharedMetric`], a reference
//! counted handle that is compared by identity. Two handles are the same
//! metric only if they point at the same instance, even when two separately
//! built metrics would score every sequence identically.
//!
//! ```rust
//! use phaser::chromosome::Chromosome;
//! use phaser::fitness::SharedMetric;
//! use phaser::gene_sequence::GeneSequence;
//!
//! let metric = SharedMetric::from_fn(|c: &Chromosome| Ok(c.length() as f64));
//! let same = metric.clone();
//! let lookalike = SharedMetric::from_fn(|c: &Chromosome| Ok(c.length() as f64));
//!
//! assert!(metric.same_instance(&same));
//! assert!(!metric.same_instance(&lookalike));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{PhaserError, Result};
use crate::gene_sequence::GeneSequence;

/// Scores a gene sequence. Lower costs are fitter.
pub trait FitnessMetric<C: GeneSequence>: Send + Sync {
    /// Computes the cost of `chromosome`.
    ///
    /// # Errors
    ///
    /// Any error is handed back to the caller of the population operator that
    /// triggered the evaluation, unmodified.
    fn evaluate(&self, chromosome: &C) -> Result<f64>;

    /// Whether evaluating has no observable side effects, such as drawing from
    /// a shared seeded generator. Only such metrics are evaluated on the rayon
    /// thread pool.
    fn is_side_effect_free(&self) -> bool {
        false
    }
}

impl<C, F> FitnessMetric<C> for F
where
    C: GeneSequence,
    F: Fn(&C) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, chromosome: &C) -> Result<f64> {
        self(chromosome)
    }
}

/// A shared, identity-compared handle to a fitness metric.
pub struct SharedMetric<C: GeneSequence> {
    inner: Arc<dyn FitnessMetric<C>>,
}

impl<C: GeneSequence> SharedMetric<C> {
    /// Wraps `metric` into a fresh handle. Every call creates a distinct instance.
    pub fn new<M>(metric: M) -> Self
    where
        M: FitnessMetric<C> + 'static,
    {
        Self {
            inner: Arc::new(metric),
        }
    }

    /// Wraps a closure into a fresh handle.
    pub fn from_fn<F>(metric: F) -> Self
    where
        F: Fn(&C) -> Result<f64> + Send + Sync + 'static,
    {
        Self::new(metric)
    }

    /// Wraps an already shared metric without creating a new instance.
    pub fn from_arc(inner: Arc<dyn FitnessMetric<C>>) -> Self {
        Self { inner }
    }

    /// Evaluates `chromosome`, rejecting costs that are NaN or infinite.
    ///
    /// # Errors
    ///
    /// Propagates the metric's own error, or returns
    /// `PhaserError::InvalidNumericValue` for a non-finite cost.
    pub fn evaluate(&self, chromosome: &C) -> Result<f64> {
        let cost = self.inner.evaluate(chromosome)?;
        if !cost.is_finite() {
            return Err(PhaserError::InvalidNumericValue(format!(
                "Non-finite fitness {} for chromosome {}",
                cost, chromosome
            )));
        }
        Ok(cost)
    }

    /// See [`FitnessMetric::is_side_effect_free`].
    pub fn is_side_effect_free(&self) -> bool {
        self.inner.is_side_effect_free()
    }

    /// Returns `true` if both handles point at the same metric instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl<C: GeneSequence> Clone for SharedMetric<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: GeneSequence> fmt::Debug for SharedMetric<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedMetric")
            .field("instance", &self.address())
            .finish()
    }
}
