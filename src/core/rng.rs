//! Deterministic random number generation.
//!
//! Two things in this crate need randomness: placing mines on a fresh
//! minefield, and the uniform fallback move when the engine has no proven
//! safe cell. Both draw from `GameRng` so a whole simulated game replays
//! exactly from its seed.
//!
//! ```
//! use rust_minesweeper::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Each simulated game gets its own stream
//! let mut game_rng = rng.fork();
//!
//! let mut replay = GameRng::new(42);
//! let mut replay_game = replay.fork();
//! assert_eq!(game_rng.gen_bool(0.5), replay_game.gen_bool(0.5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic ChaCha8 RNG with forking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent stream.
    ///
    /// Successive forks differ from each other, but the n-th fork of two RNGs
    /// with the same seed is identical.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Choose a random element from a slice, uniformly.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
