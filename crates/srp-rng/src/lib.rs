#![deny(missing_docs)]
#![doc = "Deterministic, jumpable random number generation for the SRP engine."]

pub mod distributions;
pub mod engine;
pub mod pool;
pub mod seed;

pub use distributions::{log_gamma, PTRS_THRESHOLD};
pub use engine::Xoroshiro128Plus;
pub use pool::{fold_back, RngPool};
pub use seed::derive_substream_seed;
