use alloc::vec::Vec;

pub use random::*;

mod random;

/// Source of unbiased samples without replacement.
pub trait IndexSampler {
    /// Draws `k` distinct indices from `0..n`, every `k`-subset being equally likely.
    fn sample_distinct(&mut self, k: usize, n: usize) -> Vec<usize>;
}

impl<S: IndexSampler + ?Sized> IndexSampler for &mut S {
    fn sample_distinct(&mut self, k: usize, n: usize) -> Vec<usize> {
        (**self).sample_distinct(k, n)
    }
}
