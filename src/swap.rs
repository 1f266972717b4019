//! Component E: swap.
//!
//! Materialises the rewrite chosen by selection: walks the ordered candidate
//! list, filters each candidate's positions down to those not yet occupied
//! by an earlier (higher-priority) candidate, re-checks compressibility on
//! the surviving count, and — if still compressible — allocates a
//! meta-token and records the replacement. Grounded on
//! `original_source/small/swap.py::perform_swaps`.

use std::collections::HashMap;

use crate::config::CompressionConfig;
use crate::discovery::is_compressible;
use crate::meta_pool::MetaTokenPool;
use crate::token::Token;
use crate::types::{Candidate, DictionaryMap};

/// Maps a body position to `(consumed length, replacement meta-token)`.
pub type ReplacementMap<T> = HashMap<usize, (usize, T)>;

/// Output of [`perform_swaps`]: the replacement map, the dictionary map it
/// produced, and meta-tokens in allocation order.
pub struct SwapResult<T> {
    pub replacements: ReplacementMap<T>,
    pub dictionary_map: DictionaryMap<T>,
    pub meta_tokens_used: Vec<T>,
}

fn positions_available(occupied: &[bool], start: usize, length: usize) -> bool {
    occupied[start..start + length].iter().all(|&b| !b)
}

/// Apply `candidates` (already ordered by selection) to `tokens`, allocating
/// meta-tokens from a freshly built [`MetaTokenPool`] seeded by `seed`.
///
/// `allocated_meta_tokens` is the set of meta-tokens minted by *earlier*
/// hierarchical passes within the same `compress` call (possibly no longer
/// present literally in `tokens`, if a pass has since folded them into a
/// higher-level meta-token). The pool must exclude these too, or a later
/// pass can re-mint a key already used as a dictionary entry and silently
/// overwrite it (spec.md §4.D, I2).
pub fn perform_swaps<T: Token>(
    tokens: &[T],
    candidates: &[Candidate<T>],
    cfg: &CompressionConfig,
    seed: u64,
    allocated_meta_tokens: &[T],
) -> SwapResult<T> {
    let mut occupied = vec![false; tokens.len()];
    let mut replacements: ReplacementMap<T> = HashMap::new();
    let mut dictionary_map: DictionaryMap<T> = DictionaryMap::new();
    let mut meta_tokens_used = Vec::new();

    let mut pool_exclusions: Vec<T> = tokens.to_vec();
    pool_exclusions.extend(allocated_meta_tokens.iter().cloned());
    let mut pool = MetaTokenPool::new(cfg, &pool_exclusions, seed);
    let extra = cfg.length_extra_cost();

    for candidate in candidates {
        let available: Vec<usize> = candidate
            .positions
            .iter()
            .copied()
            .filter(|&pos| positions_available(&occupied, pos, candidate.length))
            .collect();
        if !is_compressible(candidate.length, available.len(), extra) {
            continue;
        }
        let Some(meta) = pool.pop() else {
            tracing::debug!("swap: meta-token pool exhausted, stopping allocation");
            break;
        };
        dictionary_map.insert(meta.clone(), candidate.subsequence.clone());
        meta_tokens_used.push(meta.clone());
        for &pos in &available {
            for idx in pos..pos + candidate.length {
                occupied[idx] = true;
            }
            replacements.insert(pos, (candidate.length, meta.clone()));
        }
    }

    tracing::debug!(
        entries = dictionary_map.len(),
        "swap: dictionary entries allocated"
    );

    SwapResult {
        replacements,
        dictionary_map,
        meta_tokens_used,
    }
}
