//! # Individual
//!
//! An `Individual` pairs a gene sequence with the fitness its metric assigned
//! to it. The fitness is computed once, when the individual is built, and is
//! never recomputed afterwards: copying an individual into the next
//! generation carries its score along.
//!
//! Individuals are ranked by a total order:
//!
//! 1. lower fitness first,
//! 2. then shorter sequences,
//! 3. then lexicographically smaller sequences.
//!
//! The third level makes rankings reproducible: any permutation of the same
//! individuals sorts into the same sequence. Fitness is compared with
//! `f64::total_cmp`, so a NaN carried in through [`Individual::with_fitness`]
//! still has a fixed rank (after every finite fitness when positive).

use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;
use crate::fitness::SharedMetric;
use crate::gene_sequence::GeneSequence;

/// A gene sequence with its pre-computed fitness.
///
/// Both parts are fixed once the individual exists:
///
/// ```compile_fail
/// use phaser::{Chromosome, Individual};
///
/// let mut individual = Individual::with_fitness(Chromosome::default(), 1.0);
/// individual.fitness = 0.0;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<C: GeneSequence> {
    chromosome: C,
    fitness: f64,
}

impl<C: GeneSequence> Individual<C> {
    /// Evaluates `chromosome` with `metric` and wraps both together.
    ///
    /// # Errors
    ///
    /// Returns whatever the metric fails with, or
    /// `PhaserError::InvalidNumericValue` for a non-finite cost.
    pub fn new(chromosome: C, metric: &SharedMetric<C>) -> Result<Self> {
        let fitness = metric.evaluate(&chromosome)?;
        Ok(Self {
            chromosome,
            fitness,
        })
    }

    /// Builds an individual from a fitness that has already been computed.
    pub fn with_fitness(chromosome: C, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    /// The candidate sequence.
    pub fn chromosome(&self) -> &C {
        &self.chromosome
    }

    /// Cost assigned by the metric; lower is fitter.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Compares two individuals by fitness, then length, then genes.
    ///
    /// `Ordering::Less` means `self` is the fitter of the two.
    pub fn fitness_ordering(&self, other: &Self) -> Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then_with(|| self.chromosome.length().cmp(&other.chromosome.length()))
            .then_with(|| self.chromosome.cmp(&other.chromosome))
    }
}

impl<C: GeneSequence> fmt::Display for Individual<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fitness, self.chromosome)
    }
}

/// Returns `true` if `a` ranks strictly before `b`.
pub fn is_fitter<C: GeneSequence>(a: &Individual<C>, b: &Individual<C>) -> bool {
    a.fitness_ordering(b) == Ordering::Less
}

/// Returns the individuals stable-sorted from fittest to least fit.
pub fn sorted_individuals<C: GeneSequence>(mut individuals: Vec<Individual<C>>) -> Vec<Individual<C>> {
    individuals.sort_by(Individual::fitness_ordering);
    individuals
}
