use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};
use srp_core::{HamiltonianParams, SimParams};
use srp_rng::Xoroshiro128Plus;

/// YAML-configurable parameters governing an ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EnsembleConfig {
    /// Time grid, group limits, solver switch and pruning tolerance.
    #[serde(default)]
    pub sim: SimParams,
    /// Parameters shared by every reduced block.
    #[serde(default)]
    pub hamiltonian: HamiltonianParams,
    /// Worker threads for the block loop (0 selects the rayon default).
    #[serde(default)]
    pub threads: usize,
    /// Master seed policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

impl EnsembleConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SrpError> {
        let config: Self = serde_yaml::from_str(text).map_err(|err| {
            SrpError::Config(ErrorInfo::new("config_parse", err.to_string()))
        })?;
        config.sim.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, SrpError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SrpError::Io(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Generator seeded from the configured master seed.
    pub fn rng(&self) -> Xoroshiro128Plus {
        Xoroshiro128Plus::from_master_seed(self.seed_policy.master_seed)
    }
}
