//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    ///
    /// Implementations return `min` when `max < min`.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by an OS-seeded `StdRng`.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.0.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u32_range_stays_within_inclusive_bounds() {
        let mut rng = SystemRng::seeded(7);

        for _ in 0..1_000 {
            let value = rng.next_u32_range(12, 20);
            assert!((12..=20).contains(&value));
        }
    }

    #[test]
    fn test_next_u32_range_returns_min_for_inverted_range() {
        let mut rng = SystemRng::seeded(7);

        assert_eq!(rng.next_u32_range(12, 3), 12);
        assert_eq!(rng.next_u32_range(5, 5), 5);
    }

    #[test]
    fn test_next_u32_range_reaches_both_ends() {
        let mut rng = SystemRng::seeded(42);

        let values: Vec<u32> = (0..500).map(|_| rng.next_u32_range(0, 3)).collect();

        assert!(values.contains(&0));
        assert!(values.contains(&3));
    }
}
