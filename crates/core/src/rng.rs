//! RNG module - injectable random sources for part spawning
//!
//! The session draws two values per spawn: the catalog index and the
//! horizontal jitter. Both come from a [`RandomSource`] so tests can script
//! them exactly.
//!
//! Provides a seeded LCG for gameplay and a replaying source for tests.

/// Source of uniformly distributed small integers.
pub trait RandomSource {
    /// Return a value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (reseeding with it continues the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested range, so `ScriptedRng::new(vec![2, 1])`
/// spawns catalog entry 2 with jitter 1 on every spawn.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        value % max.max(1)
    }
}
