//! RNG module - seeded randomness for tile spawning
//!
//! The game only needs two capabilities: a uniform integer in `[0, n)` for the
//! spawn probe start, and a weighted coin for the spawned tile value. A small
//! LCG keeps whole games reproducible from a single `u32` seed.

/// 32-bit linear congruential generator (Numerical Recipes multiplier and increment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // state = (1664525 * state + 1013904223) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform draw from `[0, max)`; 0 when `max` is 0.
    ///
    /// Scales by the high bits; the low bits of an LCG have very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// `true` with probability `numerator / denominator`.
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.next_range(denominator) < numerator
    }

    /// Current internal state (reseeding with it replays the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
