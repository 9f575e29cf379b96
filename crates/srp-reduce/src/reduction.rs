//! Full reduction of one bath: grouping, enumeration and weights.

use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};
use srp_core::SpinBath;

use crate::combinatorics::{block_size, weight};
use crate::product::{cartesian_product, CombinationMatrix};
use crate::shrink::{shrink, GroupedBath};

/// A bath reduced to weighted blocks of collective multiplicities.
///
/// An empty bath reduces to a single block with no groups, weight 1 and
/// block size 1, so callers never special-case it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BathReduction {
    grouped: GroupedBath,
    combinations: CombinationMatrix,
    weights: Vec<u128>,
    block_sizes: Vec<u128>,
}

impl BathReduction {
    /// Validates, groups into at most `max_groups` sets and enumerates blocks.
    pub fn from_bath(bath: &SpinBath, max_groups: usize) -> Result<Self, SrpError> {
        bath.ensure_spin_half()?;
        let grouped = shrink(bath.couplings(), max_groups, bath.len())?;
        Self::from_grouped(grouped)
    }

    /// Enumerates blocks for an already grouped bath.
    pub fn from_grouped(grouped: GroupedBath) -> Result<Self, SrpError> {
        let combinations = cartesian_product(&grouped.counts)?;
        let mut weights = Vec::with_capacity(combinations.cols());
        let mut block_sizes = Vec::with_capacity(combinations.cols());
        for column in combinations.columns() {
            weights.push(weight(&grouped.counts, column)?);
            block_sizes.push(block_size(column)?);
        }
        let reduction = Self {
            grouped,
            combinations,
            weights,
            block_sizes,
        };
        reduction.check_partition()?;
        Ok(reduction)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.combinations.cols()
    }

    /// Always false; even an empty bath has its trivial block.
    pub fn is_empty(&self) -> bool {
        self.combinations.cols() == 0
    }

    /// Grouped couplings and counts.
    pub fn grouped(&self) -> &GroupedBath {
        &self.grouped
    }

    /// Enumerated combinations.
    pub fn combinations(&self) -> &CombinationMatrix {
        &self.combinations
    }

    /// Reduced multiplicities of block `j`.
    pub fn multiplicities(&self, j: usize) -> &[u64] {
        self.combinations.column(j)
    }

    /// Degeneracy weight of block `j`.
    pub fn weight(&self, j: usize) -> u128 {
        self.weights[j]
    }

    /// Dimension of block `j`.
    pub fn block_size(&self, j: usize) -> u128 {
        self.block_sizes[j]
    }

    /// Unreduced nuclear dimension `2^N`.
    pub fn dimension(&self) -> Result<u128, SrpError> {
        let nuclei = self.grouped.total_nuclei();
        u32::try_from(nuclei)
            .ok()
            .and_then(|shift| 1u128.checked_shl(shift))
            .ok_or_else(|| {
                SrpError::Overflow(
                    ErrorInfo::new("bath_dimension", "nuclear dimension exceeds u128")
                        .with_context("nuclei", nuclei),
                )
            })
    }

    /// Checks `Σ w(K) ∏K == 2^N` over all blocks.
    pub fn check_partition(&self) -> Result<(), SrpError> {
        let expected = self.dimension()?;
        let mut total: u128 = 0;
        for (w, z) in self.weights.iter().zip(&self.block_sizes) {
            total = w
                .checked_mul(*z)
                .and_then(|wz| total.checked_add(wz))
                .ok_or_else(|| {
                    SrpError::Overflow(ErrorInfo::new(
                        "partition_overflow",
                        "weighted block total exceeds u128",
                    ))
                })?;
        }
        if total != expected {
            return Err(SrpError::Reduction(
                ErrorInfo::new("partition_mismatch", "blocks do not cover the nuclear space")
                    .with_context("expected", expected)
                    .with_context("found", total),
            ));
        }
        Ok(())
    }
}
