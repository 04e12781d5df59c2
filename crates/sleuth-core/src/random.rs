//! Seeded random draws.
//!
//! Everything random in a case flows through one [`RandomSource`], so a seed
//! fully determines the generated case.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A seeded pseudo-random source with the handful of draws the game needs.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    pub fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        assert!(low < high, "empty range {low}..{high}");
        self.rng.random_range(low..high)
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform index into a collection of `len` items.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty collection");
        self.rng.random_range(0..len)
    }

    /// Pick one element uniformly.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Return true with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Draw `N` random bytes.
    pub fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        self.rng.fill(&mut buf[..]);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.uniform_int(0, 1000), b.uniform_int(0, 1000));
        }
        assert_eq!(a.bytes::<16>(), b.bytes::<16>());
    }

    #[test]
    fn uniform_int_in_range() {
        let mut r = RandomSource::seeded(7);
        for _ in 0..500 {
            let v = r.uniform_int(70, 100);
            assert!((70..100).contains(&v));
        }
    }

    #[test]
    fn uniform_float_in_unit_interval() {
        let mut r = RandomSource::seeded(7);
        for _ in 0..500 {
            let v = r.uniform_float();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn pick_covers_all_items() {
        let mut r = RandomSource::seeded(0);
        let items = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*r.pick(&items));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn chance_extremes() {
        let mut r = RandomSource::seeded(1);
        assert!((0..100).all(|_| r.chance(1.0)));
        assert!((0..100).all(|_| !r.chance(0.0)));
        // out-of-range probabilities are clamped, not rejected
        assert!(r.chance(3.0));
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn empty_range_panics() {
        RandomSource::seeded(1).uniform_int(5, 5);
    }

    #[test]
    #[should_panic(expected = "empty collection")]
    fn pick_empty_panics() {
        let empty: [u8; 0] = [];
        RandomSource::seeded(1).pick(&empty);
    }
}
