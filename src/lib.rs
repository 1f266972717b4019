//! Lossless Token Sequence Compressor.
//!
//! Dictionary-based compression over opaque, hashable token sequences: find
//! repeated contiguous subsequences, replace non-overlapping occurrences
//! with a synthetic meta-token, and emit a self-describing dictionary frame
//! a decoder can expand back into the exact original sequence.
//!
//! The two public entry points are [`compress`] and [`decompress`]; every
//! other module (`discovery`, `selection`, `swap`, `framing`) is `pub` so a
//! collaborator with its own preferred-candidate source (see
//! [`types::Candidate::with_priority`]) can drive the pipeline stage by
//! stage instead of through [`compress`].
//!
//! ```
//! use ltsc::{compress, decompress, CompressionConfig};
//!
//! let cfg = CompressionConfig {
//!     max_subsequence_length: 3,
//!     rng_seed: Some(7),
//!     ..Default::default()
//! };
//! let tokens: Vec<String> = "a b c a b c a b c z"
//!     .split_whitespace()
//!     .map(str::to_string)
//!     .collect();
//! let result = compress(&tokens, &cfg).unwrap();
//! assert_eq!(decompress(&result.frame, &cfg).unwrap(), tokens);
//! ```

pub mod config;
pub mod decoder;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod framing;
pub mod meta_pool;
pub mod selection;
pub mod swap;
pub mod token;
pub mod types;

pub use config::{CompressionConfig, SelectionMode};
pub use error::LtscError;
pub use token::Token;
pub use types::{Candidate, CompressionResult, DictionaryMap, Occurrence};

use engine::Engine;

/// Compress `tokens` under `cfg`.
///
/// Validates `cfg`, rejects input containing reserved delimiter / meta /
/// length patterns, runs the discovery → selection → swap pipeline
/// (hierarchically, if `cfg.hierarchical_enabled`), and frames the result.
/// When `cfg.verify` is set, the framed output is immediately decompressed
/// and compared against `tokens`, failing with [`LtscError::Verification`]
/// on any mismatch rather than returning a silently-broken result.
pub fn compress<T: Token>(
    tokens: &[T],
    cfg: &CompressionConfig,
) -> Result<CompressionResult<T>, LtscError> {
    cfg.validate()?;
    token::require_no_reserved_tokens(tokens, cfg)?;

    if tokens.is_empty() {
        return Ok(CompressionResult {
            frame: Vec::new(),
            dictionary_tokens: Vec::new(),
            body_tokens: Vec::new(),
            dictionary_map: DictionaryMap::new(),
            meta_tokens_used: Vec::new(),
            original_length: 0,
            compressed_length: 0,
        });
    }

    let engine = Engine::new(cfg);
    let run = engine.run(tokens, cfg);

    let dictionary_tokens = framing::build_dictionary_tokens(&run.dictionary_map, cfg);
    let mut frame = Vec::with_capacity(dictionary_tokens.len() + run.body_tokens.len());
    frame.extend(dictionary_tokens.iter().cloned());
    frame.extend(run.body_tokens.iter().cloned());

    if cfg.verify {
        let roundtrip = decompress(&frame, cfg)?;
        if roundtrip.len() != tokens.len() {
            return Err(LtscError::Verification { mismatch_index: None });
        }
        if let Some(idx) = roundtrip.iter().zip(tokens).position(|(a, b)| a != b) {
            return Err(LtscError::Verification {
                mismatch_index: Some(idx),
            });
        }
    }

    let original_length = tokens.len();
    let compressed_length = frame.len();
    Ok(CompressionResult {
        frame,
        dictionary_tokens,
        body_tokens: run.body_tokens,
        dictionary_map: run.dictionary_map,
        meta_tokens_used: run.meta_tokens_used,
        original_length,
        compressed_length,
    })
}

/// Decompress a framed token sequence produced by [`compress`] (or any
/// conforming producer) back into the original token sequence.
pub fn decompress<T: Token>(frame: &[T], cfg: &CompressionConfig) -> Result<Vec<T>, LtscError> {
    cfg.validate()?;
    decoder::decode(frame, cfg)
}
