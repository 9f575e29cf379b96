use srp_core::errors::{ErrorInfo, SrpError};

fn overflow(what: &str, n: u64, r: u64) -> SrpError {
    SrpError::Overflow(
        ErrorInfo::new("combinatorics_overflow", format!("{what} exceeds u128"))
            .with_context("n", n)
            .with_context("r", r),
    )
}

/// Binomial coefficient `C(n, r)` by the multiplicative formula.
///
/// Requires `r <= n`; this is only checked in debug builds. Each partial
/// product is itself a binomial coefficient, so every division is exact.
pub fn n_choose_r(n: u64, r: u64) -> Result<u128, SrpError> {
    debug_assert!(r <= n, "n_choose_r requires r <= n (n={n}, r={r})");
    let r = r.min(n - r);
    let mut acc: u128 = 1;
    for i in 0..r {
        acc = acc
            .checked_mul(u128::from(n - i))
            .ok_or_else(|| overflow("binomial coefficient", n, r))?
            / u128::from(i + 1);
    }
    Ok(acc)
}

/// Number of ways `n` spin-1/2 nuclei couple to total multiplicity `k`.
///
/// `k` must have the parity of `n + 1` and satisfy `1 <= k <= n + 1`.
pub fn group_weight(n: u64, k: u64) -> Result<u128, SrpError> {
    let numerator = n_choose_r(n, (n + k - 1) / 2)?
        .checked_mul(u128::from(k) * 2)
        .ok_or_else(|| overflow("degeneracy numerator", n, k))?;
    let denominator = u128::from(n + k + 1);
    if numerator % denominator != 0 {
        return Err(SrpError::Reduction(
            ErrorInfo::new("inexact_weight", "degeneracy weight is not an integer")
                .with_context("n", n)
                .with_context("k", k)
                .with_hint("k must have the parity of n + 1 and lie in 1..=n+1"),
        ));
    }
    Ok(numerator / denominator)
}

/// Degeneracy weight of a combination: product of per-group weights.
pub fn weight(counts: &[u64], multiplicities: &[u64]) -> Result<u128, SrpError> {
    if counts.len() != multiplicities.len() {
        return Err(SrpError::InvalidArgument(
            ErrorInfo::new("weight_shape", "counts and multiplicities differ in length")
                .with_context("counts", counts.len())
                .with_context("multiplicities", multiplicities.len()),
        ));
    }
    counts
        .iter()
        .zip(multiplicities)
        .try_fold(1u128, |acc, (&n, &k)| {
            acc.checked_mul(group_weight(n, k)?)
                .ok_or_else(|| overflow("degeneracy weight", n, k))
        })
}

/// Block dimension `∏ K[i]`.
pub fn block_size(multiplicities: &[u64]) -> Result<u128, SrpError> {
    multiplicities.iter().try_fold(1u128, |acc, &k| {
        acc.checked_mul(u128::from(k)).ok_or_else(|| {
            SrpError::Overflow(
                ErrorInfo::new("block_size_overflow", "block dimension exceeds u128")
                    .with_context("groups", multiplicities.len()),
            )
        })
    })
}
