pub mod chromosome;
pub mod error;
pub mod fitness;
pub mod gene_sequence;
pub mod individual;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use error::{OptionExt, PhaserError, Result, ResultExt};
pub use fitness::{FitnessMetric, SharedMetric};
pub use gene_sequence::GeneSequence;
pub use individual::{is_fitter, sorted_individuals, Individual};
pub use population::{Population, PopulationOptions};
pub use selection::{PairSelection, Selection};
