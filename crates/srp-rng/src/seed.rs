//! Seed-derivation helpers.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Derives the deterministic seed word for a specific substream.
///
/// Hashes `(master_seed, substream)` with SipHash-1-3 under fixed zero keys,
/// which keeps the mapping stable across platforms and releases.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
