use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};
use srp_core::{ObservableSeries, RunProvenance, SchemaVersion, SimParams, SpinBath};
use srp_rng::{RngPool, Xoroshiro128Plus};
use tracing::{debug, info};

use crate::config::EnsembleConfig;
use crate::plan::{plan_blocks, BlockPlan, BlockRoute, PlannedBlock};
use crate::sink::OutputSink;
use crate::solver::{ExactSolver, StochasticSolver};
use crate::system::ReducedSystem;

/// Summary of a completed ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleReport {
    /// Schema of this report.
    pub schema_version: SchemaVersion,
    /// Seed and tool versions.
    pub provenance: RunProvenance,
    /// Full nuclear dimension `Z`.
    pub dimension: u128,
    /// Number of time steps; series carry one more sample.
    pub steps: usize,
    /// Every block with its weight, size and route.
    pub blocks: Vec<PlannedBlock>,
    /// Blocks evaluated by the exact solver.
    pub exact_blocks: usize,
    /// Blocks evaluated by the stochastic solver.
    pub stochastic_blocks: usize,
    /// Blocks skipped as negligible.
    pub pruned_blocks: usize,
    /// Share of the nuclear space that was solved.
    pub retained_fraction: f64,
    /// Singlet yield at the final time.
    pub total_singlet_yield: f64,
    /// Triplet yield at the final time.
    pub total_triplet_yield: f64,
}

impl EnsembleReport {
    /// Serializes the report as pretty JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, SrpError> {
        serde_json::to_vec_pretty(self).map_err(|err| SrpError::io("report_encode", err))
    }

    /// Writes the report to `path` as JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), SrpError> {
        fs::write(path, self.to_json_bytes()?).map_err(|err| SrpError::io("report_write", err))
    }
}

/// Runs the symmetry-reduced ensemble average over both baths.
///
/// Blocks sharing a bath 2 column are evaluated in parallel. Each worker gets
/// its own [`ReducedSystem`] and a stream from an [`RngPool`] jumped off
/// `rng`; the pool is folded back into `rng` after every column. The first
/// solver error aborts the run.
pub fn run<E, S, O>(
    config: &EnsembleConfig,
    baths: [&SpinBath; 2],
    exact: &E,
    stochastic: &S,
    rng: &mut Xoroshiro128Plus,
    sink: &mut O,
) -> Result<EnsembleReport, SrpError>
where
    E: ExactSolver,
    S: StochasticSolver,
    O: OutputSink + ?Sized,
{
    let sim = &config.sim;
    sim.validate()?;
    let plan = plan_blocks(sim, baths)?;
    let samples = sim.n_steps() + 1;
    info!(
        nuclei_1 = baths[0].len(),
        nuclei_2 = baths[1].len(),
        dimension = %plan.dimension,
        blocks = plan.blocks.len(),
        pruned = plan.count(BlockRoute::Pruned),
        "starting ensemble run"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|err| SrpError::io("thread_pool", err))?;

    let mut total = ObservableSeries::zeros(samples);
    for j in 0..plan.reductions[1].len() {
        let blocks = plan.blocks_for(j);
        let mut streams = RngPool::new(blocks.len(), rng)?;
        let results: Result<Vec<ObservableSeries>, SrpError> = pool.install(|| {
            streams
                .streams_mut()
                .par_iter_mut()
                .zip(blocks.par_iter())
                .map(|(stream, block)| {
                    evaluate_block(&plan, block, config, exact, stochastic, stream)
                })
                .collect()
        });
        for series in results? {
            total.add_assign(&series)?;
        }
        streams.fold_into(rng);
    }

    total.scale(1.0 / plan.dimension as f64);
    let kinetics = total.derive_kinetics(sim.dt, config.hamiltonian.k_s, config.hamiltonian.k_t);
    sink.emit(&total, &kinetics)?;

    let report = EnsembleReport {
        schema_version: SchemaVersion::new(1, 0, 0),
        provenance: RunProvenance::capture(config.seed_policy.master_seed),
        dimension: plan.dimension,
        steps: sim.n_steps(),
        exact_blocks: plan.count(BlockRoute::Exact),
        stochastic_blocks: plan.count(BlockRoute::Stochastic),
        pruned_blocks: plan.count(BlockRoute::Pruned),
        retained_fraction: plan.retained_fraction(),
        total_singlet_yield: kinetics.total_singlet_yield,
        total_triplet_yield: kinetics.total_triplet_yield,
        blocks: plan.blocks,
    };
    info!(
        exact = report.exact_blocks,
        stochastic = report.stochastic_blocks,
        pruned = report.pruned_blocks,
        singlet_yield = report.total_singlet_yield,
        "ensemble run complete"
    );
    Ok(report)
}

fn evaluate_block<E, S>(
    plan: &BlockPlan,
    block: &PlannedBlock,
    config: &EnsembleConfig,
    exact: &E,
    stochastic: &S,
    stream: &mut Xoroshiro128Plus,
) -> Result<ObservableSeries, SrpError>
where
    E: ExactSolver,
    S: StochasticSolver,
{
    let sim: &SimParams = &config.sim;
    let samples = sim.n_steps() + 1;
    let system = || {
        ReducedSystem::from_blocks(
            config.hamiltonian,
            &plan.reductions,
            block.bath1_block,
            block.bath2_block,
        )
    };
    debug!(
        i = block.bath1_block,
        j = block.bath2_block,
        size = %block.block_size,
        fraction = block.fraction,
        route = ?block.route,
        "evaluating block"
    );
    let mut series = match block.route {
        BlockRoute::Pruned => return Ok(ObservableSeries::zeros(samples)),
        BlockRoute::Exact => exact.solve(&system(), sim)?,
        BlockRoute::Stochastic => stochastic.sample(&system(), sim, stream)?,
    };
    if series.len() != samples {
        return Err(SrpError::Solver(
            ErrorInfo::new("series_length", "solver returned a series of the wrong length")
                .with_context("expected", samples)
                .with_context("found", series.len())
                .with_context("route", format!("{:?}", block.route)),
        ));
    }
    series.scale(block.scale() as f64);
    Ok(series)
}
