//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct provides the random draws the population
//! engine and its collaborators need: chromosome lengths, gene picks, indices
//! and coin flips. It wraps the `rand` crate's `StdRng` so a whole search can
//! be replayed from a single seed.
//!
//! ## Example
//!
//! ```rust
//! use phaser::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let length = rng.uniform_int(3, 5);
//!
//! assert!((3..=5).contains(&length));
//! ```
//!
//! ## Thread-safe RNG
//!
//! Code that has no generator at hand can use `ThreadLocalRng`, which draws
//! from the thread-local generator of the `rand` crate:
//!
//! ```rust
//! use phaser::rng::ThreadLocalRng;
//!
//! let index = ThreadLocalRng::gen_range(0..10usize);
//! assert!(index < 10);
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, thread_rng, Rng, SeedableRng};

/// A thread-local random number generator that can be used without synchronization.
///
/// It uses the built-in `ThreadRng` from the `rand` crate, which is automatically
/// seeded from the system entropy and is thread-local.
pub struct ThreadLocalRng;

impl ThreadLocalRng {
    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        thread_rng().gen_range(range)
    }

    /// Creates a seeded `RandomNumberGenerator` from thread-local entropy.
    pub fn fork() -> RandomNumberGenerator {
        RandomNumberGenerator::from_seed(thread_rng().gen())
    }
}

/// A wrapper around the `rand` crate's `StdRng` with the draws used by the
/// population engine.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators built from the same seed produce the same draws, which
    /// makes whole search runs reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws an integer uniformly from the inclusive range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn uniform_int(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }

    /// Draws an index uniformly from `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns `true` with probability `probability`, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Picks one element of `items` uniformly, or `None` if it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
