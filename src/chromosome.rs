//! # Chromosome
//!
//! A `Chromosome` is a sequence of optimiser steps, written as a string of
//! one-character step abbreviations. Applying the steps in order is the
//! optimisation pipeline whose cost the fitness metric measures.
//!
//! ```rust
//! use phaser::chromosome::Chromosome;
//! use phaser::gene_sequence::GeneSequence;
//!
//! let chromosome: Chromosome = "fDxs".parse().unwrap();
//!
//! assert_eq!(chromosome.length(), 4);
//! assert_eq!(
//!     chromosome.optimisation_steps().collect::<Vec<_>>(),
//!     vec!["BlockFlattener", "DeadCodeEliminator", "ExpressionSplitter", "ExpressionSimplifier"],
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{OptionExt, PhaserError, Result};
use crate::gene_sequence::GeneSequence;
use crate::rng::RandomNumberGenerator;

/// Abbreviation and name of every optimiser step a gene can stand for.
pub const OPTIMISATION_STEPS: &[(char, &str)] = &[
    ('f', "BlockFlattener"),
    ('l', "CircularReferencesPruner"),
    ('c', "CommonSubexpressionEliminator"),
    ('C', "ConditionalSimplifier"),
    ('U', "ConditionalUnsimplifier"),
    ('n', "ControlFlowSimplifier"),
    ('D', "DeadCodeEliminator"),
    ('E', "EqualStoreEliminator"),
    ('v', "EquivalentFunctionCombiner"),
    ('e', "ExpressionInliner"),
    ('j', "ExpressionJoiner"),
    ('s', "ExpressionSimplifier"),
    ('x', "ExpressionSplitter"),
    ('I', "ForLoopConditionIntoBody"),
    ('O', "ForLoopConditionOutOfBody"),
    ('o', "ForLoopInitRewriter"),
    ('i', "FullInliner"),
    ('g', "FunctionGrouper"),
    ('h', "FunctionHoister"),
    ('F', "FunctionSpecializer"),
    ('T', "LiteralRematerialiser"),
    ('L', "LoadResolver"),
    ('M', "LoopInvariantCodeMotion"),
    ('m', "Rematerialiser"),
    ('V', "SSAReverser"),
    ('a', "SSATransform"),
    ('t', "StructuralSimplifier"),
    ('r', "UnusedAssignEliminator"),
    ('p', "UnusedFunctionParameterPruner"),
    ('u', "UnusedPruner"),
    ('S', "UnusedStoreEliminator"),
    ('d', "VarDeclInitializer"),
];

/// Returns the name of the optimiser step abbreviated by `gene`.
pub fn step_name(gene: char) -> Option<&'static str> {
    OPTIMISATION_STEPS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == gene)
        .map(|(_, name)| *name)
}

/// A validated sequence of optimiser step abbreviations.
///
/// Chromosomes order lexicographically by their genes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chromosome {
    genes: String,
}

impl Chromosome {
    /// Creates a chromosome from a string of step abbreviations.
    ///
    /// # Errors
    ///
    /// Returns `PhaserError::InvalidChromosome` if any character does not
    /// abbreviate a known optimiser step.
    pub fn new(genes: &str) -> Result<Self> {
        for (position, gene) in genes.chars().enumerate() {
            step_name(gene).ok_or_else_phaser(|| {
                PhaserError::InvalidChromosome(format!(
                    "gene '{}' at position {} is not an optimiser step",
                    gene, position
                ))
            })?;
        }

        Ok(Self {
            genes: genes.to_string(),
        })
    }

    /// Returns the genes as a string of step abbreviations.
    pub fn genes(&self) -> &str {
        &self.genes
    }

    /// Iterates over the full names of the steps, in application order.
    pub fn optimisation_steps(&self) -> impl Iterator<Item = &'static str> + '_ {
        // Genes are validated on construction.
        self.genes.chars().filter_map(step_name)
    }
}

impl GeneSequence for Chromosome {
    fn length(&self) -> usize {
        self.genes.chars().count()
    }

    fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let genes = (0..length)
            .map(|_| OPTIMISATION_STEPS[rng.index(OPTIMISATION_STEPS.len())].0)
            .collect();

        Self { genes }
    }
}

impl FromStr for Chromosome {
    type Err = PhaserError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_abbreviations_are_unique() {
        let abbreviations: HashSet<char> = OPTIMISATION_STEPS.iter().map(|(a, _)| *a).collect();
        assert_eq!(abbreviations.len(), OPTIMISATION_STEPS.len());
    }

    #[test]
    fn test_new_rejects_unknown_gene() {
        let result = Chromosome::new("fDz");

        match result {
            Err(PhaserError::InvalidChromosome(msg)) => {
                assert!(msg.contains("'z'"));
                assert!(msg.contains("position 2"));
            }
            _ => panic!("Expected InvalidChromosome error"),
        }
    }

    #[test]
    fn test_empty_chromosome() {
        let chromosome = Chromosome::new("").unwrap();
        assert_eq!(chromosome.length(), 0);
        assert_eq!(chromosome.to_string(), "");
    }

    #[test]
    fn test_display_round_trips_genes() {
        let chromosome: Chromosome = "aVtus".parse().unwrap();
        assert_eq!(chromosome.to_string(), "aVtus");
        assert_eq!(chromosome.genes(), "aVtus");
    }

    #[test]
    fn test_random_has_requested_length_and_valid_genes() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        for length in [0, 1, 7, 50] {
            let chromosome = Chromosome::random(length, &mut rng);
            assert_eq!(chromosome.length(), length);
            assert!(Chromosome::new(chromosome.genes()).is_ok());
        }
    }

    #[test]
    fn test_random_is_reproducible_from_seed() {
        let mut rng1 = RandomNumberGenerator::from_seed(11);
        let mut rng2 = RandomNumberGenerator::from_seed(11);
        assert_eq!(
            Chromosome::random(20, &mut rng1),
            Chromosome::random(20, &mut rng2)
        );
    }

    #[test]
    fn test_lexicographic_order() {
        let a: Chromosome = "aa".parse().unwrap();
        let b: Chromosome = "ac".parse().unwrap();
        let shorter: Chromosome = "a".parse().unwrap();
        assert!(a < b);
        assert!(shorter < a);
    }

    #[test]
    fn test_step_name_lookup() {
        assert_eq!(step_name('M'), Some("LoopInvariantCodeMotion"));
        assert_eq!(step_name('#'), None);
    }
}
