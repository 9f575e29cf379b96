use serde::{Deserialize, Serialize};
use srp_core::errors::{ErrorInfo, SrpError};

/// Couplings collapsed into groups of nuclei treated as identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupedBath {
    /// Representative coupling of each group.
    pub couplings: Vec<f64>,
    /// Number of nuclei in each group.
    pub counts: Vec<u64>,
}

impl GroupedBath {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true when there are no groups.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of nuclei across all groups.
    pub fn total_nuclei(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Groups `couplings` into at most `target_count` sets of equivalent nuclei.
///
/// Couplings are sorted and cut into contiguous runs whose sizes differ by at
/// most one. Each run is represented by `sign(mean) * sqrt(mean(a^2))`, which
/// keeps the run's summed squared coupling unchanged.
pub fn shrink(
    couplings: &[f64],
    target_count: usize,
    original_count: usize,
) -> Result<GroupedBath, SrpError> {
    if couplings.len() != original_count {
        return Err(SrpError::InvalidArgument(
            ErrorInfo::new("shrink_count", "coupling count does not match the bath size")
                .with_context("couplings", couplings.len())
                .with_context("original_count", original_count),
        ));
    }
    if couplings.is_empty() {
        return Ok(GroupedBath::default());
    }
    if target_count == 0 {
        return Err(SrpError::InvalidArgument(
            ErrorInfo::new("shrink_target", "a non-empty bath needs at least one group")
                .with_context("nuclei", original_count)
                .with_hint("raise max_groups for this bath"),
        ));
    }

    let mut sorted = couplings.to_vec();
    sorted.sort_by(f64::total_cmp);

    let groups = target_count.min(sorted.len());
    let base = sorted.len() / groups;
    let extra = sorted.len() % groups;

    let mut grouped = GroupedBath {
        couplings: Vec::with_capacity(groups),
        counts: Vec::with_capacity(groups),
    };
    let mut start = 0;
    for g in 0..groups {
        let size = base + usize::from(g < extra);
        let members = &sorted[start..start + size];
        grouped.couplings.push(representative(members));
        grouped.counts.push(size as u64);
        start += size;
    }
    Ok(grouped)
}

fn representative(members: &[f64]) -> f64 {
    let n = members.len() as f64;
    let mean = members.iter().sum::<f64>() / n;
    let rms = (members.iter().map(|a| a * a).sum::<f64>() / n).sqrt();
    if mean < 0.0 {
        -rms
    } else {
        rms
    }
}
