//! Evaluation of freshly generated chromosomes.
//!
//! Chromosomes are always generated in order by the caller. On the
//! sequential path each one is scored as soon as it is generated, and
//! generation stops at the first failure. Only metrics that declare
//! themselves side-effect free, on batches of at least `parallel_threshold`,
//! have the whole batch generated first and scored on the rayon thread pool.
//! Results keep generation order either way.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::Result;
use crate::fitness::SharedMetric;
use crate::gene_sequence::GeneSequence;
use crate::individual::Individual;

/// Batch size from which side-effect free metrics are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Scores every chromosome once, returning individuals in input order.
///
/// On failure the error of the earliest failing chromosome is returned.
pub(crate) fn evaluate_all<C: GeneSequence>(
    metric: &SharedMetric<C>,
    chromosomes: Vec<C>,
    parallel_threshold: usize,
) -> Result<Vec<Individual<C>>> {
    let batch = chromosomes.len();
    evaluate_generated(metric, chromosomes.into_iter(), batch, parallel_threshold)
}

/// Pulls `batch` chromosomes from `generated` and scores them in order.
///
/// `generated` is only advanced past a chromosome once that chromosome has
/// been scored, unless the batch goes to the thread pool.
pub(crate) fn evaluate_generated<C, I>(
    metric: &SharedMetric<C>,
    generated: I,
    batch: usize,
    parallel_threshold: usize,
) -> Result<Vec<Individual<C>>>
where
    C: GeneSequence,
    I: Iterator<Item = C>,
{
    if metric.is_side_effect_free() && batch >= parallel_threshold {
        let chromosomes: Vec<C> = generated.collect();
        debug!(
            batch = chromosomes.len(),
            parallel_threshold, "evaluating batch on thread pool"
        );
        let results: Vec<Result<Individual<C>>> = chromosomes
            .into_par_iter()
            .map(|chromosome| Individual::new(chromosome, metric))
            .collect();
        return results.into_iter().collect();
    }

    trace!(batch, "evaluating batch sequentially");
    generated
        .map(|chromosome| Individual::new(chromosome, metric))
        .collect()
}
