//! RNG module - seeded piece selection
//!
//! Two randomizers are available:
//!
//! - **Uniform**: every draw is an independent pick among the seven kinds.
//! - **Bag**: the "7-bag" algorithm; each bag holds one of every kind,
//!   shuffled, and is emptied before the next bag is generated.
//!
//! Both run on a small LCG so that the same seed always yields the same
//! sequence within a process.

use serde::{Deserialize, Serialize};

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
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag,
}

impl Randomizer {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::Bag => "bag",
        }
    }
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    randomizer: Randomizer,
    rng: SimpleRng,
    /// Current bag (Bag mode only)
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means exhausted
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        Self {
            randomizer,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u32) {
        *self = Self::new(self.randomizer, seed);
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Randomizer::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut generator = PieceGenerator::new(Randomizer::Bag, 1);

        for _ in 0..3 {
            let mut drawn = Vec::new();
            for _ in 0..7 {
                drawn.push(generator.draw());
            }
            for kind in PieceKind::ALL {
                assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
            }
        }
    }

    #[test]
    fn test_uniform_eventually_draws_every_kind() {
        let mut generator = PieceGenerator::new(Randomizer::Uniform, 99);
        let drawn: Vec<_> = (0..500).map(|_| generator.draw()).collect();
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_reseed_replays_sequence() {
        for randomizer in [Randomizer::Uniform, Randomizer::Bag] {
            let mut generator = PieceGenerator::new(randomizer, 42);
            let first: Vec<_> = (0..20).map(|_| generator.draw()).collect();
            generator.reseed(42);
            let second: Vec<_> = (0..20).map(|_| generator.draw()).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_randomizer_names() {
        assert_eq!(Randomizer::from_str("BAG"), Some(Randomizer::Bag));
        assert_eq!(Randomizer::from_str("uniform"), Some(Randomizer::Uniform));
        assert_eq!(Randomizer::from_str("nes"), None);
        assert_eq!(Randomizer::Bag.as_str(), "bag");
    }
}
