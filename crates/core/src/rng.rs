//! RNG module - seeded randomness for deck shuffling
//!
//! Wraps ChaCha8 so that a seed fully determines a deal (useful for tests and
//! replays) while still giving uniform draws. The shuffle is a plain
//! Fisher-Yates over `gen_range`, so every arrangement of the deck is equally
//! likely.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used to deal decks.
#[derive(Debug, Clone)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Seed this RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..=upper`.
    pub fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }

    /// Shuffle a slice in place using Fisher-Yates.
    ///
    /// For `i` from the last index down to 1, swaps element `i` with a
    /// uniformly chosen element at an index `<= i`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i);
            slice.swap(i, j);
        }
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        Self::new(1)
    }
}
