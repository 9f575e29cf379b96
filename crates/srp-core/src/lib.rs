#![deny(missing_docs)]
#![doc = "Shared data model, error surface and observable series for the SRP engine."]

pub mod errors;
pub mod observable;
pub mod provenance;
mod types;

pub use errors::{ErrorInfo, SrpError};
pub use observable::{Kinetics, ObservableSeries};
pub use provenance::{RunProvenance, SchemaVersion};
pub use types::{HamiltonianParams, SimParams, SpinBath, SPIN_HALF_MULTIPLICITY};
