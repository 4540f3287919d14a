//! Random tile placement.
//!
//! The engine never reaches for a global generator. Anything that can hand
//! out a unit float and a uniform index can drive spawning, which is what
//! lets tests script exact placements. Every `rand::Rng` qualifies.

use rand::Rng;

use super::state::Tile;

/// Source of randomness for tile spawns.
pub trait TileSource {
    /// A float uniformly drawn from `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// An index uniformly drawn from `0..len`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> TileSource for R {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    #[inline]
    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Probability of spawning a 4 when a 2 did not come up.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Decides which value a freshly spawned tile gets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    pub four_probability: f64,
}

impl Default for SpawnRule {
    fn default() -> Self {
        Self { four_probability: DEFAULT_FOUR_PROBABILITY }
    }
}

impl SpawnRule {
    pub fn new(four_probability: f64) -> Self {
        Self { four_probability }
    }

    /// Draw a tile value: 2 with probability `1 - four_probability`, else 4.
    #[inline]
    pub fn tile<S: TileSource + ?Sized>(&self, source: &mut S) -> Tile {
        if source.unit() < 1.0 - self.four_probability { 2 } else { 4 }
    }
}
