//! xoroshiro128+ bit generator with a 2^64-step jump.

use rand::{RngCore, SeedableRng};
use rand_core::impls;
use serde::{Deserialize, Serialize};

use crate::seed::derive_substream_seed;

/// Jump polynomial, applied lowest bit first.
const JUMP: [u64; 2] = [0xBEAC_0467_EBA5_FACB, 0xD86B_048B_86AA_9922];

/// Mask selecting the exponent bits of `1.0_f64`.
const ONE_EXPONENT: u64 = 0x3FF0_0000_0000_0000;

/// Seedable 128-bit state generator.
///
/// Every draw mutates the state in place, so a generator must never be shared
/// between concurrent users. Independent streams are obtained with
/// [`Xoroshiro128Plus::jumped`] (or an [`RngPool`](crate::RngPool)), which
/// places them 2^64 draws apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xoroshiro128Plus {
    s1: u64,
    s2: u64,
    #[serde(default)]
    pub(crate) cached_normal: Option<f64>,
}

impl Xoroshiro128Plus {
    /// Seeds the generator with two words and jumps once to decorrelate weak seeds.
    ///
    /// An all-zero seed is a fixed point of the recurrence and must be avoided.
    pub fn seed(w1: u64, w2: u64) -> Self {
        let mut rng = Self::from_state(w1, w2);
        rng.jump();
        rng
    }

    /// Seeds from a single master seed using the SipHash substream rule.
    pub fn from_master_seed(master_seed: u64) -> Self {
        Self::seed(
            derive_substream_seed(master_seed, 0),
            derive_substream_seed(master_seed, 1),
        )
    }

    /// Restores a generator from a raw state without jumping.
    pub fn from_state(s1: u64, s2: u64) -> Self {
        Self {
            s1,
            s2,
            cached_normal: None,
        }
    }

    /// Raw state words.
    pub fn state(&self) -> [u64; 2] {
        [self.s1, self.s2]
    }

    pub(crate) fn xor_state(&mut self, other: [u64; 2]) {
        self.s1 ^= other[0];
        self.s2 ^= other[1];
        self.cached_normal = None;
    }

    /// Returns the next 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.step()
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let s1 = self.s1;
        let out = s1.wrapping_add(self.s2);
        let s2 = s1 ^ self.s2;
        self.s1 = s1.rotate_left(55) ^ s2 ^ (s2 << 14);
        self.s2 = s2.rotate_left(36);
        out
    }

    /// Advances the state as if by 2^64 calls to [`Self::next_u64`].
    ///
    /// The result depends only on the state words; any cached normal deviate
    /// is discarded.
    pub fn jump(&mut self) {
        let mut acc = [0u64; 2];
        for word in JUMP {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    acc[0] ^= self.s1;
                    acc[1] ^= self.s2;
                }
                self.step();
            }
        }
        self.s1 = acc[0];
        self.s2 = acc[1];
        self.cached_normal = None;
    }

    /// Returns a jumped copy, leaving `self` untouched.
    pub fn jumped(&self) -> Self {
        let mut next = Self::from_state(self.s1, self.s2);
        next.jump();
        next
    }

    /// Uniform deviate in `[0, 1)` built from the top 52 bits of one draw.
    #[inline]
    pub fn unif01(&mut self) -> f64 {
        f64::from_bits(ONE_EXPONENT | (self.step() >> 12)) - 1.0
    }
}

impl RngCore for Xoroshiro128Plus {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoroshiro128Plus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        let (w1, w2) = (u64::from_le_bytes(lo), u64::from_le_bytes(hi));
        if w1 == 0 && w2 == 0 {
            return Self::from_master_seed(0);
        }
        Self::seed(w1, w2)
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::from_master_seed(state)
    }
}
