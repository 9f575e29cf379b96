use srp_core::{ObservableSeries, SimParams, SrpError};
use srp_rng::Xoroshiro128Plus;

use crate::system::ReducedSystem;

/// Deterministic dynamics for a block small enough to enumerate.
pub trait ExactSolver: Sync {
    /// Returns populations on the `n_steps + 1` point grid.
    fn solve(
        &self,
        system: &ReducedSystem,
        params: &SimParams,
    ) -> Result<ObservableSeries, SrpError>;
}

/// Monte Carlo trace sampling for blocks too large for the exact solver.
pub trait StochasticSolver: Sync {
    /// Returns populations on the `n_steps + 1` point grid, drawing from `rng`.
    fn sample(
        &self,
        system: &ReducedSystem,
        params: &SimParams,
        rng: &mut Xoroshiro128Plus,
    ) -> Result<ObservableSeries, SrpError>;
}

impl<F> ExactSolver for F
where
    F: Fn(&ReducedSystem, &SimParams) -> Result<ObservableSeries, SrpError> + Sync,
{
    fn solve(
        &self,
        system: &ReducedSystem,
        params: &SimParams,
    ) -> Result<ObservableSeries, SrpError> {
        self(system, params)
    }
}

impl<F> StochasticSolver for F
where
    F: Fn(&ReducedSystem, &SimParams, &mut Xoroshiro128Plus) -> Result<ObservableSeries, SrpError>
        + Sync,
{
    fn sample(
        &self,
        system: &ReducedSystem,
        params: &SimParams,
        rng: &mut Xoroshiro128Plus,
    ) -> Result<ObservableSeries, SrpError> {
        self(system, params, rng)
    }
}
