//! Seeded generator - mulberry32 with a range descriptor
//!
//! Every "random" layout value on the page comes from here. The sequence is
//! fully determined by the seed, so re-laying out the same content (on resize,
//! on reload) reproduces the same jitter without storing it.
//!
//! The mixing steps are bit-exact with the reference mulberry32:
//! seed 1 yields `0.6270739405881613`, `0.002735721180215478`, ...

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{hash, AnnivError, AnnivResult};

/// Weyl increment added to the state on every draw
pub const MULBERRY32_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, the divisor that maps a mixed word onto `[0, 1)`
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Half-open output range `[lo, hi)`.
///
/// Missing bounds fall back to `lo = 0`, `hi = 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngRange {
    pub lo: Option<f64>,
    pub hi: Option<f64>,
}

impl RngRange {
    pub const DEFAULT_LO: f64 = 0.0;
    pub const DEFAULT_HI: f64 = 1.0;

    /// Range with both bounds set
    pub fn new(lo: f64, hi: f64) -> Self {
        Self {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    /// The unit interval `[0, 1)`
    pub fn unit() -> Self {
        Self::default()
    }

    pub fn with_lo(mut self, lo: f64) -> Self {
        self.lo = Some(lo);
        self
    }

    pub fn with_hi(mut self, hi: f64) -> Self {
        self.hi = Some(hi);
        self
    }

    /// Bounds with defaults applied, unchecked
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.lo.unwrap_or(Self::DEFAULT_LO),
            self.hi.unwrap_or(Self::DEFAULT_HI),
        )
    }

    /// Bounds with defaults applied.
    ///
    /// Rejects non-finite bounds and `lo >= hi`.
    pub fn resolve(&self) -> AnnivResult<(f64, f64)> {
        let (lo, hi) = self.bounds();
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(AnnivError::InvalidRange { lo, hi });
        }
        Ok((lo, hi))
    }

    /// Map a unit value `x` in `[0, 1)` onto `[lo, hi)`
    #[inline]
    pub fn scale(lo: f64, hi: f64, x: f64) -> f64 {
        x * (hi - lo) + lo
    }
}

impl From<Range<f64>> for RngRange {
    fn from(range: Range<f64>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Anything callable as "give me a number in this range".
///
/// Implemented by the generator itself and by shared per-item references, so
/// model entries can carry either.
pub trait RangeSampler {
    fn sample(&mut self, range: RngRange) -> AnnivResult<f64>;
}

/// mulberry32: one 32-bit word of state, advanced by a Weyl step and mixed
/// with two xor-shift-multiply rounds.
///
/// Not for cryptographic use. Draws mutate `self`, so one instance serves one
/// logical stream; use [`SharedRng`] to hand the same stream to several owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generator seeded by [`hash`] of a stable key (event id, photo filename)
    pub fn from_key(key: &str) -> Self {
        Self::new(hash(key))
    }

    /// Generator from a JSON-style numeric seed.
    ///
    /// Truncates toward zero and wraps modulo 2^32, so `-1.0` seeds the same
    /// stream as `u32::MAX`. Non-finite seeds are rejected.
    pub fn from_f64_seed(seed: f64) -> AnnivResult<Self> {
        if !seed.is_finite() {
            return Err(AnnivError::InvalidSeed(seed));
        }
        let wrapped = seed.trunc().rem_euclid(TWO_POW_32);
        Ok(Self::new(wrapped as u32))
    }

    /// Current state word
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the next mixed 32-bit word
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY32_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Next value in the given range.
    ///
    /// An invalid range is rejected before the state advances, so a failed
    /// call leaves the stream where it was.
    pub fn sample(&mut self, range: RngRange) -> AnnivResult<f64> {
        let (lo, hi) = range.resolve()?;
        Ok(RngRange::scale(lo, hi, self.next_f64()))
    }

    /// Shorthand for `sample(RngRange::new(lo, hi))`
    pub fn range(&mut self, lo: f64, hi: f64) -> AnnivResult<f64> {
        self.sample(RngRange::new(lo, hi))
    }
}

impl RangeSampler for Mulberry32 {
    fn sample(&mut self, range: RngRange) -> AnnivResult<f64> {
        Mulberry32::sample(self, range)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        Mulberry32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = Mulberry32::next_u32(self) as u64;
        let lo = Mulberry32::next_u32(self) as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = Mulberry32::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Shared reference to one generator stream.
///
/// Clones draw from the same state; copying a model entry that holds one is a
/// shallow copy of the reference, not a fork of the stream.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<Mulberry32>>);

impl SharedRng {
    pub fn new(seed: u32) -> Self {
        Self::from_generator(Mulberry32::new(seed))
    }

    pub fn from_key(key: &str) -> Self {
        Self::from_generator(Mulberry32::from_key(key))
    }

    pub fn from_generator(generator: Mulberry32) -> Self {
        Self(Arc::new(Mutex::new(generator)))
    }

    /// Draw from the shared stream
    pub fn sample(&self, range: RngRange) -> AnnivResult<f64> {
        self.0.lock().sample(range)
    }

    /// Do both handles point at the same stream?
    pub fn ptr_eq(&self, other: &SharedRng) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Snapshot of the generator, for forking a stream
    pub fn snapshot(&self) -> Mulberry32 {
        self.0.lock().clone()
    }
}

impl RangeSampler for SharedRng {
    fn sample(&mut self, range: RngRange) -> AnnivResult<f64> {
        SharedRng::sample(self, range)
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRng(state={:08x})", self.0.lock().state())
    }
}
