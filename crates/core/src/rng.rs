//! RNG module - seedable uniform piece selection
//!
//! Piece kinds are drawn uniformly at random from the seven-kind catalog;
//! there is no bag randomizer, every draw is independent. A small LCG keeps
//! the core dependency-free and makes piece sequences reproducible from a
//! seed, which the tests rely on.

use crate::types::PieceKind;

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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Uniform random piece stream
///
/// Every draw picks one of the seven kinds with equal probability,
/// independently of previous draws.
#[derive(Debug, Clone)]
pub struct PieceStream {
    rng: SimpleRng,
}

impl PieceStream {
    /// Create a new stream with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceStream {
    fn default() -> Self {
        Self::new(1)
    }
}
