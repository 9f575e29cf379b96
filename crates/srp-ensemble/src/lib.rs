#![deny(missing_docs)]
#![doc = "Symmetry-reduced ensemble averaging of radical-pair spin dynamics."]

/// YAML configuration schema and defaults.
pub mod config;
/// Parallel block evaluation and the public `run` entry point.
pub mod ensemble;
/// Block enumeration, weighting and routing.
pub mod plan;
/// Output destinations for the averaged series.
pub mod sink;
/// Contracts for the exact and stochastic block solvers.
pub mod solver;
/// Per-block reduced system descriptors.
pub mod system;

pub use config::{EnsembleConfig, SeedPolicy};
pub use ensemble::{run, EnsembleReport};
pub use plan::{plan_blocks, BlockPlan, BlockRoute, PlannedBlock};
pub use sink::{CsvSink, MemorySink, OutputSink};
pub use solver::{ExactSolver, StochasticSolver};
pub use system::{ReducedBath, ReducedSystem};
