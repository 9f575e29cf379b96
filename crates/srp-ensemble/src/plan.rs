use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};
use srp_core::{SimParams, SpinBath};
use srp_reduce::BathReduction;

/// How a block is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockRoute {
    /// Weight below tolerance; contributes a zero series without solving.
    Pruned,
    /// Small enough for full enumeration.
    Exact,
    /// Evaluated by trace sampling with a private RNG stream.
    Stochastic,
}

/// A single `(bath 1 block, bath 2 block)` pair and its routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedBlock {
    /// Column of bath 1's combination matrix.
    pub bath1_block: usize,
    /// Column of bath 2's combination matrix.
    pub bath2_block: usize,
    /// Combined degeneracy weight `w1 * w2`.
    pub weight: u128,
    /// Combined block dimension `Z1 * Z2`.
    pub block_size: u128,
    /// Share of the full nuclear space, `weight * block_size / Z`.
    pub fraction: f64,
    /// Evaluation route.
    pub route: BlockRoute,
}

impl PlannedBlock {
    /// Factor applied to the block's series before accumulation.
    pub fn scale(&self) -> u128 {
        self.weight * self.block_size
    }
}

/// Every block of a two-bath problem, ordered bath 2 major, bath 1 minor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPlan {
    /// Full nuclear dimension `Z` of both baths.
    pub dimension: u128,
    /// Reductions of bath 1 and bath 2.
    pub reductions: [BathReduction; 2],
    /// Planned blocks; index `j * len1 + i` holds block `(i, j)`.
    pub blocks: Vec<PlannedBlock>,
}

impl BlockPlan {
    /// Blocks sharing bath 2 column `j`, in bath 1 order.
    pub fn blocks_for(&self, j: usize) -> &[PlannedBlock] {
        let inner = self.reductions[0].len();
        &self.blocks[j * inner..(j + 1) * inner]
    }

    /// Number of blocks taking `route`.
    pub fn count(&self, route: BlockRoute) -> usize {
        self.blocks.iter().filter(|b| b.route == route).count()
    }

    /// Share of the nuclear space that is actually solved.
    pub fn retained_fraction(&self) -> f64 {
        self.blocks
            .iter()
            .filter(|b| b.route != BlockRoute::Pruned)
            .map(|b| b.fraction)
            .sum()
    }
}

fn overflow(code: &str, message: &str) -> SrpError {
    SrpError::Overflow(ErrorInfo::new(code, message))
}

/// Reduces both baths and decides how every block is evaluated.
pub fn plan_blocks(sim: &SimParams, baths: [&SpinBath; 2]) -> Result<BlockPlan, SrpError> {
    let dimension = baths[0]
        .dimension()?
        .checked_mul(baths[1].dimension()?)
        .ok_or_else(|| overflow("total_dimension", "combined nuclear dimension exceeds u128"))?;

    let reductions = [
        BathReduction::from_bath(baths[0], sim.max_groups[0])?,
        BathReduction::from_bath(baths[1], sim.max_groups[1])?,
    ];

    let n_samples = u128::from(sim.n_samples);
    let mut blocks = Vec::with_capacity(reductions[0].len() * reductions[1].len());
    for j in 0..reductions[1].len() {
        for i in 0..reductions[0].len() {
            let weight = reductions[0]
                .weight(i)
                .checked_mul(reductions[1].weight(j))
                .ok_or_else(|| overflow("block_weight", "block weight exceeds u128"))?;
            let block_size = reductions[0]
                .block_size(i)
                .checked_mul(reductions[1].block_size(j))
                .ok_or_else(|| overflow("block_size", "block dimension exceeds u128"))?;
            let scale = weight
                .checked_mul(block_size)
                .ok_or_else(|| overflow("block_scale", "weighted block exceeds u128"))?;
            let fraction = scale as f64 / dimension as f64;
            let route = if fraction <= sim.block_tol {
                BlockRoute::Pruned
            } else if block_size <= n_samples {
                BlockRoute::Exact
            } else {
                BlockRoute::Stochastic
            };
            blocks.push(PlannedBlock {
                bath1_block: i,
                bath2_block: j,
                weight,
                block_size,
                fraction,
                route,
            });
        }
    }

    Ok(BlockPlan {
        dimension,
        reductions,
        blocks,
    })
}
