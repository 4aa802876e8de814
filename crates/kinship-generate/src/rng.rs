use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use kinship_core::Sex;

/// The single random source of a generation run.
///
/// Every draw goes through this handle, which is passed by `&mut` into each
/// step. The same seed yields the same draw sequence on every platform.
#[derive(Debug, Clone)]
pub struct RngContext {
    rng: ChaCha8Rng,
}

impl RngContext {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform child count in `[0, max_children]`.
    pub fn child_count(&mut self, max_children: u32) -> u32 {
        self.rng.random_range(0..=max_children)
    }

    pub fn sex(&mut self) -> Sex {
        if self.rng.random_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    /// Two distinct uniform indexes below `len`, or `None` when `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let first = self.rng.random_range(0..len);
        let mut second = self.rng.random_range(0..len - 1);
        if second >= first {
            second += 1;
        }
        Some((first, second))
    }
}
