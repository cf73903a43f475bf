use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Partial Fisher-Yates shuffle over a seeded [`SmallRng`].
#[derive(Clone, Debug)]
pub struct RandomSampler {
    rng: SmallRng,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl IndexSampler for RandomSampler {
    fn sample_distinct(&mut self, k: usize, n: usize) -> Vec<usize> {
        if k > n {
            log::warn!("Requested {} distinct samples out of only {}", k, n);
        }
        let k = k.min(n);

        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = self.rng.random_range(i..n);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}
