//! # Population
//!
//! A [`Population`] is one generation of the search: an ordered, immutable
//! list of scored individuals bound to a single fitness metric instance. Its
//! operators turn one generation into the next:
//!
//! - [`Population::select`] copies individuals picked by a selection,
//! - [`Population::mutate`] scores mutated copies of picked individuals,
//! - [`Population::crossover`] scores one child per picked pair,
//! - [`Population::symmetric_crossover_with_remainder`] scores two children
//!   per pair and hands back the individuals no pair used,
//! - [`Population::combine`] and `+` concatenate populations sharing a metric.
//!
//! ## Example
//!
//! ```rust
//! use phaser::chromosome::Chromosome;
//! use phaser::fitness::SharedMetric;
//! use phaser::gene_sequence::GeneSequence;
//! use phaser::population::Population;
//! use phaser::rng::RandomNumberGenerator;
//! use phaser::selection::{RandomPairSelection, RangeSelection};
//!
//! let metric = SharedMetric::from_fn(|c: &Chromosome| Ok(c.length() as f64));
//! let mut rng = RandomNumberGenerator::from_seed(42);
//!
//! let population = Population::make_random_with_lengths(metric, 10, 5, 15, &mut rng).unwrap();
//!
//! let elite = population.sorted().select(&RangeSelection::new(0.0, 0.5).unwrap());
//! let (children, remainder) = population
//!     .symmetric_crossover_with_remainder(
//!         &RandomPairSelection::with_seed(0.25, 7).unwrap(),
//!         |a: &Chromosome, b: &Chromosome| (b.clone(), a.clone()),
//!     )
//!     .unwrap();
//!
//! assert_eq!(elite.len(), 5);
//! assert!(Population::combine((children, remainder)).metric().same_instance(population.metric()));
//! ```
pub mod engine;
pub mod evaluation;
pub mod options;

pub use engine::Population;
pub use evaluation::DEFAULT_PARALLEL_THRESHOLD;
pub use options::{PopulationOptions, PopulationOptionsBuilder};
