//! Pools of mutually non-overlapping streams for concurrent regions.

use srp_core::errors::{ErrorInfo, SrpError};

use crate::engine::Xoroshiro128Plus;

/// A fixed set of generators separated by successive jumps.
///
/// Stream `k` is the seed generator jumped `k + 1` times, so every stream owns
/// a disjoint window of 2^64 draws. Streams are handed out by `&mut` and are
/// never shared between workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RngPool {
    streams: Vec<Xoroshiro128Plus>,
}

impl RngPool {
    /// Derives `size` streams from `seed_rng` without advancing it.
    pub fn new(size: usize, seed_rng: &Xoroshiro128Plus) -> Result<Self, SrpError> {
        if size < 1 {
            return Err(SrpError::InvalidArgument(
                ErrorInfo::new("rng_pool_size", "an RNG pool needs at least one stream")
                    .with_context("size", size),
            ));
        }
        let mut streams = Vec::with_capacity(size);
        let mut current = seed_rng.jumped();
        for _ in 1..size {
            let next = current.jumped();
            streams.push(current);
            current = next;
        }
        streams.push(current);
        Ok(Self { streams })
    }

    /// Number of streams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Always false; pools hold at least one stream.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Borrows stream `index`.
    pub fn get(&self, index: usize) -> Option<&Xoroshiro128Plus> {
        self.streams.get(index)
    }

    /// Exclusive access to all streams, for handing one to each worker.
    pub fn streams_mut(&mut self) -> &mut [Xoroshiro128Plus] {
        &mut self.streams
    }

    /// Iterates over the streams in order.
    pub fn iter(&self) -> impl Iterator<Item = &Xoroshiro128Plus> {
        self.streams.iter()
    }

    /// Consumes the pool, returning its streams.
    pub fn into_streams(self) -> Vec<Xoroshiro128Plus> {
        self.streams
    }

    /// XORs every stream's state into `rng`.
    ///
    /// Used after a concurrent region so the sequential generator continues
    /// from a state that depends on all work done inside it.
    pub fn fold_into(&self, rng: &mut Xoroshiro128Plus) {
        for stream in &self.streams {
            rng.xor_state(stream.state());
        }
    }
}

/// Free-function form of [`RngPool::fold_into`].
pub fn fold_back(pool: &RngPool, rng: &mut Xoroshiro128Plus) {
    pool.fold_into(rng);
}
