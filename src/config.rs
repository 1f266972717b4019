//! Compression configuration.
//!
//! `CompressionConfig` mirrors `spec.md` §3's configuration record field
//! for field. Defaults match the spec exactly; [`CompressionConfig::validate`]
//! is the single place malformed configuration is rejected, called from the
//! top of [`crate::compress`] and [`crate::decompress`] (style grounded on
//! `jafreck-lz4r/src/config.rs`'s one-constant-per-concern layout, adapted
//! from compile-time constants to a runtime record since this crate has no
//! CLI to source flags from).

use crate::error::LtscError;

/// Occurrence-selection strategy (component C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Sort by `(-priority, start, length)` and sweep, keeping the first
    /// non-overlapping occurrence at each step.
    #[default]
    Greedy,
    /// Weighted interval scheduling via dynamic programming.
    Optimal,
    /// Bounded-width beam search over skip/take branches.
    Beam,
}

/// Immutable configuration record for [`crate::compress`] / [`crate::decompress`].
///
/// All fields are `pub`; the type carries no invariants on its own beyond
/// what [`CompressionConfig::validate`] checks, since a `Default` config is
/// always valid and partial updates (`CompressionConfig { beam_width: 8,
/// ..Default::default() }`) are the expected construction idiom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Inclusive upper bound on candidate subsequence length. Must be >= 2.
    pub max_subsequence_length: usize,
    /// Fence prefix for synthetic meta-tokens (e.g. `"<MT_"`).
    pub meta_token_prefix: String,
    /// Fence suffix for synthetic meta-tokens (e.g. `">"`).
    pub meta_token_suffix: String,
    /// Cap on the number of distinct meta-tokens mintable per compression
    /// call (summed across all hierarchical passes). Must be >= 1.
    pub meta_token_pool_size: usize,
    /// Dictionary-region start delimiter token.
    pub dict_start_token: String,
    /// Dictionary-region end delimiter token.
    pub dict_end_token: String,
    /// When true, each dictionary entry is preceded by a length token so the
    /// decoder can locate entry boundaries without scanning for the next
    /// meta-token.
    pub dict_length_enabled: bool,
    /// Fence prefix for length tokens (e.g. `"<Len:"`).
    pub dict_length_prefix: String,
    /// Fence suffix for length tokens (e.g. `">"`).
    pub dict_length_suffix: String,
    /// Enable multi-pass (hierarchical) compression of the rewritten body.
    pub hierarchical_enabled: bool,
    /// Maximum number of hierarchical passes. Must be >= 1.
    pub hierarchical_max_depth: usize,
    /// Occurrence-selection strategy.
    pub selection_mode: SelectionMode,
    /// State-retention cap for [`SelectionMode::Beam`]. Must be >= 1.
    pub beam_width: usize,
    /// Seed controlling meta-token pool shuffle order. When `None`, the
    /// engine draws one seed from entropy at the start of a `compress` call
    /// and reuses it for every pool constructed during that call.
    pub rng_seed: Option<u64>,
    /// When true, `compress` round-trips its own output through `decompress`
    /// and fails with [`LtscError::Verification`] on mismatch.
    pub verify: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        CompressionConfig {
            max_subsequence_length: 6,
            meta_token_prefix: "<MT_".to_string(),
            meta_token_suffix: ">".to_string(),
            meta_token_pool_size: 512,
            dict_start_token: "<Dict>".to_string(),
            dict_end_token: "</Dict>".to_string(),
            dict_length_enabled: true,
            dict_length_prefix: "<Len:".to_string(),
            dict_length_suffix: ">".to_string(),
            hierarchical_enabled: true,
            hierarchical_max_depth: 3,
            selection_mode: SelectionMode::Greedy,
            beam_width: 8,
            rng_seed: None,
            verify: false,
        }
    }
}

impl CompressionConfig {
    /// Rejects configurations that cannot be interpreted, per `spec.md` §7's
    /// `ConfigError` row.
    pub fn validate(&self) -> Result<(), LtscError> {
        if self.max_subsequence_length < 2 {
            return Err(LtscError::Config {
                message: format!(
                    "max_subsequence_length must be >= 2, got {}",
                    self.max_subsequence_length
                ),
            });
        }
        if self.meta_token_pool_size < 1 {
            return Err(LtscError::Config {
                message: "meta_token_pool_size must be >= 1".to_string(),
            });
        }
        if self.hierarchical_enabled && self.hierarchical_max_depth < 1 {
            return Err(LtscError::Config {
                message: "hierarchical_max_depth must be >= 1 when hierarchical_enabled"
                    .to_string(),
            });
        }
        if self.selection_mode == SelectionMode::Beam && self.beam_width < 1 {
            return Err(LtscError::Config {
                message: "beam_width must be >= 1".to_string(),
            });
        }
        if self.dict_start_token == self.dict_end_token {
            return Err(LtscError::Config {
                message: "dict_start_token and dict_end_token must differ".to_string(),
            });
        }
        Ok(())
    }

    /// Extra per-subsequence header cost contributed by length framing: `1`
    /// when enabled, `0` otherwise. Used throughout the compressibility
    /// predicate (`spec.md` §4.B).
    pub fn length_extra_cost(&self) -> usize {
        usize::from(self.dict_length_enabled)
    }
}
