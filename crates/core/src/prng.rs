//! Deterministic Xorshift64 PRNG.
//!
//! Drives paperclip rest positions, the jitter of captured clips and the
//! scatter of sprinkled iron filings. Same seed always produces the same
//! sequence, so a [`Scene`](crate::scene::Scene) replays identically.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Xorshift64 (shifts 13, 7, 17). Seed 0 is replaced with a non-zero
/// fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform point inside a disc of `radius` around the origin.
    pub fn next_in_disc(&mut self, radius: f64) -> DVec2 {
        let r = radius * self.next_f64().sqrt();
        let theta = self.next_range(0.0, std::f64::consts::TAU);
        DVec2::new(r * theta.cos(), r * theta.sin())
    }
}
