pub mod bounds;
pub mod error;
pub mod objective;
pub mod rng;
pub mod run;
pub mod search;
pub mod selection;

// Re-export commonly used types for convenience
pub use bounds::Bounds;
pub use error::{OptimizationError, OptionExt, Result};
pub use objective::{Objective, ObjectiveFunction};
pub use rng::RandomNumberGenerator;
pub use run::{run, Algorithm, AlgorithmParams, PopulationStats, RunReport, RunRequest};
pub use search::{SearchOptions, SearchResult, SearchStrategy};
