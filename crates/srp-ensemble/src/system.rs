use serde::{Deserialize, Serialize};
use srp_core::HamiltonianParams;
use srp_reduce::BathReduction;

/// One electron's bath after reduction to collective spins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReducedBath {
    /// Collective multiplicity of each group.
    pub multiplicities: Vec<u64>,
    /// Representative isotropic coupling of each group.
    pub couplings: Vec<f64>,
}

impl ReducedBath {
    /// Extracts block `j` of a reduced bath.
    pub fn from_block(reduction: &BathReduction, j: usize) -> Self {
        Self {
            multiplicities: reduction.multiplicities(j).to_vec(),
            couplings: reduction.grouped().couplings.clone(),
        }
    }

    /// Product of the group multiplicities.
    pub fn dimension(&self) -> u128 {
        self.multiplicities.iter().map(|&k| u128::from(k)).product()
    }
}

/// Self-contained description of one symmetry block handed to a solver.
///
/// Each block owns its copy of the shared Hamiltonian parameters so workers
/// never share mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedSystem {
    /// Exchange, dipolar and recombination parameters.
    pub hamiltonian: HamiltonianParams,
    /// Reduced baths of electron 1 and electron 2.
    pub baths: [ReducedBath; 2],
    /// Hyperfine couplings are scalar.
    pub isotropic: bool,
}

impl ReducedSystem {
    /// Builds an isotropic system from explicit reduced baths.
    pub fn new(hamiltonian: HamiltonianParams, bath1: ReducedBath, bath2: ReducedBath) -> Self {
        Self {
            hamiltonian,
            baths: [bath1, bath2],
            isotropic: true,
        }
    }

    /// Builds the system for block `(i, j)` of two reductions.
    pub fn from_blocks(
        hamiltonian: HamiltonianParams,
        reductions: &[BathReduction; 2],
        i: usize,
        j: usize,
    ) -> Self {
        Self::new(
            hamiltonian,
            ReducedBath::from_block(&reductions[0], i),
            ReducedBath::from_block(&reductions[1], j),
        )
    }

    /// Nuclear dimension of the block.
    pub fn nuclear_dimension(&self) -> u128 {
        self.baths[0].dimension() * self.baths[1].dimension()
    }
}
