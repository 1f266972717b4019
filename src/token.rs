//! Opaque token model and the reserved-token protocol.
//!
//! Corresponds to component A ("Token & configuration model"). The engine
//! never inspects a token's contents except to test equality, compute a
//! hash, and — for meta-tokens, length tokens, and dictionary delimiters
//! only — recognise a synthetic string pattern. That narrow need is
//! captured by the [`Token`] trait rather than bounding the whole engine
//! on `T: AsRef<str>`, so non-string domains can participate too (see
//! design note on the generic token type in `SPEC_FULL.md` §9).

use std::fmt;
use std::hash::Hash;

use crate::config::CompressionConfig;
use crate::error::LtscError;

/// A hashable, equality-comparable element of a token sequence.
///
/// Implement this for any domain-specific token type. [`Token::token_str`]
/// only needs to return `Some` for tokens that could plausibly collide with
/// a reserved delimiter/meta/length pattern; returning `None` unconditionally
/// is always sound (it just means this token type can never collide with a
/// reserved pattern, and the engine can never mint fresh tokens of this type
/// via [`Token::synthesize`] — only `String`-like tokens can host a
/// meta-token pool).
pub trait Token: Clone + Eq + Hash + fmt::Debug {
    /// Borrow this token as a string slice, if it has one. Used only to test
    /// against reserved patterns (dictionary delimiters, meta-tokens, length
    /// tokens).
    fn token_str(&self) -> Option<&str> {
        None
    }

    /// Construct a token from an owned string. Used to mint synthetic
    /// meta-tokens, length tokens, and dictionary delimiters.
    fn synthesize(s: String) -> Self;
}

impl Token for String {
    fn token_str(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn synthesize(s: String) -> Self {
        s
    }
}

/// True iff `token` matches the configured meta-token fence
/// (`meta_token_prefix` ... `meta_token_suffix`).
pub fn is_meta_token<T: Token>(token: &T, cfg: &CompressionConfig) -> bool {
    match token.token_str() {
        Some(s) => s.starts_with(cfg.meta_token_prefix.as_str())
            && s.ends_with(cfg.meta_token_suffix.as_str())
            && s.len() >= cfg.meta_token_prefix.len() + cfg.meta_token_suffix.len(),
        None => false,
    }
}

/// True iff `token` matches the configured length-token fence
/// (`dict_length_prefix` ... `dict_length_suffix`). Only meaningful when
/// `cfg.dict_length_enabled`.
pub fn is_length_token<T: Token>(token: &T, cfg: &CompressionConfig) -> bool {
    match token.token_str() {
        Some(s) => {
            s.starts_with(cfg.dict_length_prefix.as_str())
                && s.ends_with(cfg.dict_length_suffix.as_str())
                && s.len() >= cfg.dict_length_prefix.len() + cfg.dict_length_suffix.len()
        }
        None => false,
    }
}

/// Fails with [`LtscError::ReservedToken`] on the first token in `seq` that
/// equals a delimiter, matches the meta-token pattern, or (when length
/// framing is enabled) matches the length-token pattern.
pub fn require_no_reserved_tokens<T: Token>(
    seq: &[T],
    cfg: &CompressionConfig,
) -> Result<(), LtscError> {
    for (index, token) in seq.iter().enumerate() {
        let reserved = token.token_str().is_some_and(|s| {
            s == cfg.dict_start_token || s == cfg.dict_end_token
        }) || is_meta_token(token, cfg)
            || (cfg.dict_length_enabled && is_length_token(token, cfg));
        if reserved {
            return Err(LtscError::ReservedToken {
                index,
                token: format!("{token:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CompressionConfig {
        CompressionConfig::default()
    }

    #[test]
    fn recognises_meta_token() {
        let cfg = cfg();
        assert!(is_meta_token(&"<MT_0>".to_string(), &cfg));
        assert!(is_meta_token(&"<MT_123>".to_string(), &cfg));
        assert!(!is_meta_token(&"<MT_>".to_string(), &cfg));
        assert!(!is_meta_token(&"MT_0".to_string(), &cfg));
        assert!(!is_meta_token(&"hello".to_string(), &cfg));
    }

    #[test]
    fn recognises_length_token() {
        let cfg = cfg();
        assert!(is_length_token(&"<Len:3>".to_string(), &cfg));
        assert!(!is_length_token(&"<Len:>".to_string(), &cfg));
    }

    #[test]
    fn rejects_dict_delimiters_in_input() {
        let cfg = cfg();
        let seq = vec!["a".to_string(), "<Dict>".to_string()];
        let err = require_no_reserved_tokens(&seq, &cfg).unwrap_err();
        assert!(matches!(err, LtscError::ReservedToken { index: 1, .. }));
    }

    #[test]
    fn rejects_meta_token_pattern_in_input() {
        let cfg = cfg();
        let seq = vec!["<MT_0>".to_string()];
        let err = require_no_reserved_tokens(&seq, &cfg).unwrap_err();
        assert!(matches!(err, LtscError::ReservedToken { index: 0, .. }));
    }

    #[test]
    fn accepts_clean_sequence() {
        let cfg = cfg();
        let seq = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(require_no_reserved_tokens(&seq, &cfg).is_ok());
    }
}
