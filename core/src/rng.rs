//! Deterministic random number generation.
//!
//! Nothing in the simulation calls a platform RNG. Guest arrivals draw
//! from a `HotelRng` seeded from the engine's seed, so the same seed and
//! the same sequence of operations produce the same guests.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct HotelRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl HotelRng {
    /// Create a stream from the master seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream: RngStream) -> Self {
        let derived_seed = master_seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: stream.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u32 in [lo, hi]. Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u64_below((hi - lo) as u64 + 1) as u32
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Stable stream assignments. Append only: reordering changes every seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Arrivals = 0,
    Names = 1,
    Demand = 2, // walk-in demand rolled by hosts
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arrivals => "arrivals",
            Self::Names => "names",
            Self::Demand => "demand",
        }
    }
}
