//! Presentation-batch sampling.
//!
//! A batch is drawn by shuffling the candidates uniformly and taking the
//! last `n`. Pools smaller than `n` are returned whole, in shuffled order.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Mutex, PoisonError};

/// Source of randomness for batch draws.
#[derive(Debug)]
pub enum BatchSampler {
    /// Thread-local RNG, seeded from the OS
    Entropy,
    /// Reproducible draws (simulation, tests)
    Seeded(Mutex<StdRng>),
}

impl BatchSampler {
    pub fn entropy() -> Self {
        BatchSampler::Entropy
    }

    pub fn seeded(seed: u64) -> Self {
        BatchSampler::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    /// Draw up to `n` items without replacement.
    pub fn sample<T: Clone>(&self, pool: &[T], n: usize) -> Vec<T> {
        let mut shuffled = pool.to_vec();
        match self {
            BatchSampler::Entropy => shuffled.shuffle(&mut rand::rng()),
            BatchSampler::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                shuffled.shuffle(&mut *rng);
            }
        }
        let start = shuffled.len().saturating_sub(n);
        shuffled.split_off(start)
    }
}

impl Default for BatchSampler {
    fn default() -> Self {
        Self::entropy()
    }
}
