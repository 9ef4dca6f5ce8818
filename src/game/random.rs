//! Uniform-draw seam shared by the wheel, the catalog, and the opponent
//!
//! Any `rand::Rng` is a `RandomSource`. Tests swap in a scripted source
//! that replays exact draws.

use rand::seq::SliceRandom;
use rand::Rng;

/// The random draws the game needs.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` must be non-zero.
    fn index(&mut self, upper: usize) -> usize;

    /// Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn index(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.random_bool(p.clamp(0.0, 1.0))
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }
}

/// Replays queued draws. Once a queue runs dry, indices fall back to 0
/// and coin flips to `false`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    indices: std::collections::VecDeque<usize>,
    chances: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue index draws (clamped to the requested range when replayed).
    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }

    /// Queue coin flip results.
    pub fn with_chances(mut self, chances: &[bool]) -> Self {
        self.chances.extend(chances.iter().copied());
        self
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn index(&mut self, upper: usize) -> usize {
        let drawn = self.indices.pop_front().unwrap_or(0);
        drawn.min(upper.saturating_sub(1))
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rng_index_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(rng.index(16) < 16);
        }
    }

    #[test]
    fn test_rng_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
        // Out-of-range probabilities are clamped rather than panicking
        assert!(rng.chance(1.5));
        assert!(!rng.chance(-0.2));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let seq1: Vec<_> = (0..20).map(|_| rng1.index(100)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.index(100)).collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut data: Vec<char> = "BCDFGHJKLMN".chars().collect();
        RandomSource::shuffle(&mut rng, &mut data);

        data.sort();
        assert_eq!(data, "BCDFGHJKLMN".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut scripted = ScriptedRandom::new()
            .with_indices(&[3, 1, 99])
            .with_chances(&[true, false]);

        assert_eq!(scripted.index(10), 3);
        assert_eq!(scripted.index(10), 1);
        assert_eq!(scripted.index(10), 9); // clamped
        assert_eq!(scripted.index(10), 0); // exhausted

        assert!(scripted.chance(0.1));
        assert!(!scripted.chance(0.9));
        assert!(!scripted.chance(0.9)); // exhausted
    }

    #[test]
    fn test_scripted_shuffle_with_zero_draws_rotates_first_element() {
        // Fisher-Yates with every draw = 0 swaps each tail element to the front
        let mut scripted = ScriptedRandom::new();
        let mut data = vec!['B', 'C', 'D'];
        scripted.shuffle(&mut data);
        assert_eq!(data, vec!['C', 'D', 'B']);
    }
}
