use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SrpError};

/// Multiplicity of a spin-1/2 nucleus, the only kind the reduction supports.
pub const SPIN_HALF_MULTIPLICITY: u32 = 2;

/// Nuclear spins coupled to one electron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpinBath {
    multiplicities: Vec<u32>,
    couplings: Vec<f64>,
}

impl SpinBath {
    /// Creates a bath from per-nucleus multiplicities `2I+1` and isotropic couplings.
    pub fn new(multiplicities: Vec<u32>, couplings: Vec<f64>) -> Result<Self, SrpError> {
        if multiplicities.len() != couplings.len() {
            return Err(SrpError::Config(
                ErrorInfo::new("bath_length_mismatch", "multiplicities and couplings differ in length")
                    .with_context("multiplicities", multiplicities.len())
                    .with_context("couplings", couplings.len()),
            ));
        }
        if let Some(index) = multiplicities.iter().position(|&g| g == 0) {
            return Err(SrpError::Config(
                ErrorInfo::new("bath_zero_multiplicity", "multiplicities must be at least 1")
                    .with_context("index", index),
            ));
        }
        Ok(Self {
            multiplicities,
            couplings,
        })
    }

    /// Creates a bath of spin-1/2 nuclei with the given couplings.
    pub fn spin_half(couplings: Vec<f64>) -> Self {
        Self {
            multiplicities: vec![SPIN_HALF_MULTIPLICITY; couplings.len()],
            couplings,
        }
    }

    /// Creates a bath without nuclei.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of nuclei in the bath.
    pub fn len(&self) -> usize {
        self.multiplicities.len()
    }

    /// Returns true when the bath carries no nuclei.
    pub fn is_empty(&self) -> bool {
        self.multiplicities.is_empty()
    }

    /// Per-nucleus multiplicities.
    pub fn multiplicities(&self) -> &[u32] {
        &self.multiplicities
    }

    /// Per-nucleus isotropic couplings.
    pub fn couplings(&self) -> &[f64] {
        &self.couplings
    }

    /// Fails with [`SrpError::UnsupportedSpin`] unless every nucleus is spin-1/2.
    pub fn ensure_spin_half(&self) -> Result<(), SrpError> {
        match self
            .multiplicities
            .iter()
            .position(|&g| g != SPIN_HALF_MULTIPLICITY)
        {
            None => Ok(()),
            Some(index) => Err(SrpError::UnsupportedSpin(
                ErrorInfo::new("unsupported_multiplicity", "only spin-1/2 nuclei can be reduced")
                    .with_context("index", index)
                    .with_context("multiplicity", self.multiplicities[index])
                    .with_hint("split higher spins into a separate exact treatment"),
            )),
        }
    }

    /// Product of all multiplicities, i.e. the nuclear Hilbert space dimension.
    pub fn dimension(&self) -> Result<u128, SrpError> {
        self.multiplicities.iter().try_fold(1u128, |acc, &g| {
            acc.checked_mul(u128::from(g)).ok_or_else(|| {
                SrpError::Overflow(
                    ErrorInfo::new("bath_dimension", "nuclear dimension exceeds u128")
                        .with_context("nuclei", self.len()),
                )
            })
        })
    }
}

/// Hamiltonian parameters shared by every reduced block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HamiltonianParams {
    /// Isotropic exchange coupling.
    #[serde(default)]
    pub j: f64,
    /// Dipolar coupling.
    #[serde(default)]
    pub d: f64,
    /// Singlet recombination rate.
    #[serde(default)]
    pub k_s: f64,
    /// Triplet recombination rate.
    #[serde(default)]
    pub k_t: f64,
}

/// Time grid and reduction controls consumed by the orchestrator and solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Time step.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Final time.
    #[serde(default = "default_t_end")]
    pub t_end: f64,
    /// Maximum number of coupling groups for bath 1 and bath 2.
    #[serde(default = "default_max_groups")]
    pub max_groups: [usize; 2],
    /// Largest block dimension still handled by the exact solver.
    #[serde(default = "default_n_samples")]
    pub n_samples: u64,
    /// Blocks whose fractional weight does not exceed this value are skipped.
    #[serde(default)]
    pub block_tol: f64,
}

fn default_dt() -> f64 {
    0.1
}

fn default_t_end() -> f64 {
    10.0
}

fn default_max_groups() -> [usize; 2] {
    [4, 4]
}

fn default_n_samples() -> u64 {
    256
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            t_end: default_t_end(),
            max_groups: default_max_groups(),
            n_samples: default_n_samples(),
            block_tol: 0.0,
        }
    }
}

impl SimParams {
    /// Number of time steps on the grid; series carry one more sample.
    pub fn n_steps(&self) -> usize {
        (self.t_end / self.dt).round() as usize
    }

    /// Checks the time grid is usable.
    pub fn validate(&self) -> Result<(), SrpError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SrpError::Config(
                ErrorInfo::new("sim_dt", "time step must be positive and finite")
                    .with_context("dt", self.dt),
            ));
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SrpError::Config(
                ErrorInfo::new("sim_t_end", "final time must be non-negative and finite")
                    .with_context("t_end", self.t_end),
            ));
        }
        if self.block_tol.is_nan() {
            return Err(SrpError::Config(ErrorInfo::new(
                "sim_block_tol",
                "block tolerance must be a number",
            )));
        }
        Ok(())
    }
}
