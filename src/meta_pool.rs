//! Component D: the meta-token pool.
//!
//! Produces a deterministically shuffled list of distinct synthetic tokens,
//! `prefix + i + suffix` for `i` in `0..pool_size`, excluding anything
//! already present in the working sequence. Grounded on
//! `original_source/small/utils.py::generate_meta_token_pool`, with the
//! shuffle algorithm made explicit per `spec.md` §9: Fisher–Yates via
//! `rand::seq::SliceRandom::shuffle`, driven by an `StdRng` seeded from
//! `rng_seed` (or, when unset, from one entropy draw made once per
//! `compress` call by [`crate::engine::Engine`] so that repeated pools
//! within the same call are still reproducible relative to each other).

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::CompressionConfig;
use crate::token::Token;

/// A pool of fresh meta-tokens, consumed front-to-back via [`MetaTokenPool::pop`].
/// Each token is allocated to exactly one subsequence.
pub struct MetaTokenPool<T> {
    tokens: Vec<T>,
}

impl<T: Token> MetaTokenPool<T> {
    /// Builds and shuffles the pool. `existing` is scanned so that no
    /// minted meta-token collides with a token already present in the
    /// working sequence.
    pub fn new(cfg: &CompressionConfig, existing: &[T], seed: u64) -> Self {
        let existing_set: HashSet<&T> = existing.iter().collect();
        let mut tokens = Vec::with_capacity(cfg.meta_token_pool_size);
        for idx in 0..cfg.meta_token_pool_size {
            let candidate = T::synthesize(format!(
                "{}{}{}",
                cfg.meta_token_prefix, idx, cfg.meta_token_suffix
            ));
            if !existing_set.contains(&candidate) {
                tokens.push(candidate);
            }
        }
        let mut rng = StdRng::seed_from_u64(seed);
        tokens.shuffle(&mut rng);
        MetaTokenPool { tokens }
    }

    /// Allocate the next meta-token, or `None` if the pool is exhausted.
    /// Exhaustion is not an error: callers silently stop compressing further
    /// patterns (`spec.md` §4.D).
    pub fn pop(&mut self) -> Option<T> {
        self.tokens.pop()
    }

    /// Remaining pool size, mostly useful for tests and diagnostics.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}
