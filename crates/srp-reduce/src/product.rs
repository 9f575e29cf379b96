use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};

use crate::combinatorics::block_size;

/// Reduced multiplicities for every combination of group total spins.
///
/// Stored column-major: column `j` is one combination `K`, row `i` is the
/// reduced multiplicity of group `i`. A matrix with zero rows has exactly one
/// (empty) column, the trivial block of size 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl CombinationMatrix {
    /// Number of groups.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of combinations.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Combination `j`.
    pub fn column(&self, j: usize) -> &[u64] {
        &self.data[j * self.rows..(j + 1) * self.rows]
    }

    /// Iterates over all combinations in column order.
    pub fn columns(&self) -> impl Iterator<Item = &[u64]> + '_ {
        (0..self.cols).map(move |j| self.column(j))
    }

    /// Reduced multiplicity of group `i` in combination `j`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.data[j * self.rows + i]
    }

    /// Block dimension `∏ K[i]` of combination `j`.
    pub fn block_size(&self, j: usize) -> Result<u128, SrpError> {
        block_size(self.column(j))
    }

    /// Row-major nested vectors, convenient for inspection and fixtures.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

/// Distinct reduced multiplicities available to a group of `n` spin-1/2 nuclei.
///
/// Value `j` (zero based) is `2j + 1 + (n mod 2)`, running up to `n + 1`.
pub fn group_multiplicities(n: u64) -> impl Iterator<Item = u64> {
    let parity = n % 2;
    (0..n / 2 + 1).map(move |j| 2 * j + 1 + parity)
}

/// Enumerates every combination of reduced multiplicities for groups of sizes `counts`.
///
/// Group 0 varies fastest: its value index for column `j` is `j % size_0`,
/// group 1 uses `(j / size_0) % size_1`, and so on.
pub fn cartesian_product(counts: &[u64]) -> Result<CombinationMatrix, SrpError> {
    let cols = counts.iter().try_fold(1usize, |acc, &n| {
        usize::try_from(n / 2 + 1)
            .ok()
            .and_then(|size| acc.checked_mul(size))
            .ok_or_else(|| {
                SrpError::Overflow(
                    ErrorInfo::new("combination_count", "too many combinations to enumerate")
                        .with_context("groups", counts.len()),
                )
            })
    })?;
    let rows = counts.len();
    let mut data = vec![0u64; rows * cols];
    let mut stride = 1usize;
    for (i, &n) in counts.iter().enumerate() {
        let values: Vec<u64> = group_multiplicities(n).collect();
        for j in 0..cols {
            data[j * rows + i] = values[(j / stride) % values.len()];
        }
        stride *= values.len();
    }
    Ok(CombinationMatrix { rows, cols, data })
}
