//! Component G: the compression engine.
//!
//! Orchestrates one or more discovery → selection → swap → rewrite passes.
//! Grounded on `original_source/small/engine.py::CompressionEngine`, trimmed
//! to the single exact-discovery stage `spec.md` actually specifies (the
//! prototype's fuzzy/suffix-array/chunked discovery stages are not part of
//! this spec and are left out, per DESIGN.md).

use rand::Rng;

use crate::config::CompressionConfig;
use crate::discovery::discover_candidates;
use crate::framing::build_body_tokens;
use crate::selection::select_occurrences;
use crate::swap::perform_swaps;
use crate::token::Token;
use crate::types::DictionaryMap;

/// Why a hierarchical run stopped — exposed for diagnostics/tests, mirroring
/// the four stop conditions in `spec.md` §4.G.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Discovery returned no candidates this pass.
    NoCandidates,
    /// Swap produced no dictionary entries (nothing survived occupancy
    /// filtering).
    NoSwaps,
    /// `hierarchical_max_depth` was reached.
    DepthLimit,
    /// Hierarchical compression is disabled; the engine always stops after
    /// one pass.
    HierarchicalDisabled,
}

/// Result of running the engine to completion.
pub struct EngineResult<T> {
    pub body_tokens: Vec<T>,
    pub dictionary_map: DictionaryMap<T>,
    pub meta_tokens_used: Vec<T>,
    pub passes_run: usize,
    pub stop_reason: StopReason,
}

/// Drives the discovery/selection/swap/rewrite pipeline, optionally
/// re-applying it to its own output up to `hierarchical_max_depth` times.
///
/// One `Engine` is built per `compress` call; it is not `Sync` (it owns the
/// seed used to build every meta-token pool during the run) and is not
/// meant to be shared across threads, per `spec.md` §5.
pub struct Engine {
    seed: u64,
}

impl Engine {
    /// Builds an engine. When `cfg.rng_seed` is `None`, a seed is drawn once
    /// from `rand::thread_rng()` so every pass within this single run shares
    /// a reproducible (if not caller-chosen) basis.
    pub fn new(cfg: &CompressionConfig) -> Self {
        let seed = cfg.rng_seed.unwrap_or_else(|| rand::thread_rng().gen());
        Engine { seed }
    }

    /// Runs the pipeline to completion on `tokens`.
    pub fn run<T: Token>(&self, tokens: &[T], cfg: &CompressionConfig) -> EngineResult<T> {
        let depth_limit = if cfg.hierarchical_enabled {
            cfg.hierarchical_max_depth
        } else {
            1
        };

        let mut working: Vec<T> = tokens.to_vec();
        let mut dictionary_map: DictionaryMap<T> = DictionaryMap::new();
        let mut meta_tokens_used = Vec::new();
        let mut passes_run = 0;
        let mut stop_reason = StopReason::DepthLimit;

        for pass in 0..depth_limit {
            let candidates = discover_candidates(&working, cfg);
            if candidates.is_empty() {
                stop_reason = StopReason::NoCandidates;
                break;
            }
            let selected = select_occurrences(&candidates, cfg);
            // Swap works against the ordered candidate list (selection's
            // output converted back to per-subsequence candidates), per
            // `spec.md` §4.E: "Selection and swap operate on the same
            // ordered candidate list; selection effectively orders them."
            let ordered_candidates = candidates_from_selected(&candidates, &selected);
            // Mix the pass index into the seed so each hierarchical pass
            // gets an independent-but-deterministic shuffle.
            let pass_seed = self.seed.wrapping_add(pass as u64);
            // Exclude every meta-token minted so far, not just those still
            // literally present in `working` — a pass can fold an earlier
            // pass's meta-token into a higher-level one, at which point it
            // no longer appears in `working` but its dictionary key must
            // still never be re-minted (spec.md §4.D, I2).
            let swap_result = perform_swaps(
                &working,
                &ordered_candidates,
                cfg,
                pass_seed,
                &meta_tokens_used,
            );
            if swap_result.dictionary_map.is_empty() {
                stop_reason = StopReason::NoSwaps;
                break;
            }
            working = build_body_tokens(&working, &swap_result.replacements);
            for (meta, expansion) in swap_result.dictionary_map {
                let previous = dictionary_map.insert(meta.clone(), expansion);
                assert!(
                    previous.is_none(),
                    "meta-token pool minted a key already present in the dictionary map"
                );
            }
            meta_tokens_used.extend(swap_result.meta_tokens_used);
            passes_run += 1;

            if !cfg.hierarchical_enabled {
                stop_reason = StopReason::HierarchicalDisabled;
                break;
            }
        }

        tracing::debug!(
            passes = passes_run,
            entries = dictionary_map.len(),
            stop_reason = ?stop_reason,
            "engine: compression run complete"
        );

        EngineResult {
            body_tokens: working,
            dictionary_map,
            meta_tokens_used,
            passes_run,
            stop_reason,
        }
    }
}

/// Selection drops occurrences and re-filters by subsequence; swap needs
/// per-subsequence candidates (one candidate per distinct subsequence, with
/// the surviving positions) rather than the flat occurrence list selection
/// returns. Rebuild that view, preserving each candidate's first-selected
/// position order and the candidate-list (not occurrence-list) iteration
/// order selection implied.
fn candidates_from_selected<T: Token>(
    candidates: &[crate::types::Candidate<T>],
    selected: &[crate::types::Occurrence<T>],
) -> Vec<crate::types::Candidate<T>> {
    use std::collections::HashSet;

    let selected_starts: HashSet<usize> = selected.iter().map(|o| o.start).collect();
    let mut out = Vec::new();
    for candidate in candidates {
        let positions: Vec<usize> = candidate
            .positions
            .iter()
            .copied()
            .filter(|p| selected_starts.contains(p))
            .collect();
        if !positions.is_empty() {
            out.push(crate::types::Candidate {
                subsequence: candidate.subsequence.clone(),
                length: candidate.length,
                positions,
                priority: candidate.priority,
            });
        }
    }
    out
}
