//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Every random draw made while generating a poster (palette colors, blob
//! radii, wobble, centers, color picks, opacities) comes from one
//! [`Xorshift64`] instance created from the poster seed. There is no global
//! random state: the generator is passed explicitly as `&mut Xorshift64` to
//! every sampling function, so the same seed always yields the same poster.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced
/// with a non-zero fallback to avoid the all-zeros fixed point, so seed 0
/// (the default poster seed) is still a perfectly good seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 between `min` and `max`.
    ///
    /// For `min <= max` the result is in [min, max). A reversed pair still
    /// yields a value between the two bounds, and `min == max` returns
    /// `min`, so slider ranges never need validating before sampling.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed f64 in [-0.5, 0.5).
    pub fn next_centered(&mut self) -> f64 {
        self.next_f64() - 0.5
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0 (division by zero in modulo).
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Picks one element of `items` uniformly by index.
    ///
    /// Returns `None` without consuming a draw when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.next_usize(items.len())])
    }
}
