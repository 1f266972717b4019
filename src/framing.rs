//! Component F: framing.
//!
//! Serialises a [`DictionaryMap`] plus a replacement map into the wire
//! format from `spec.md` §6:
//! `<Dict> [meta [<Len:N>]? subsequence-tokens]* </Dict> [body-tokens]*`.
//! Grounded on `original_source/small/dictionary.py`
//! (`build_dictionary_tokens`, `build_body_tokens`), extended with the
//! length-token fencing `spec.md` §3/§4.F add on top of the original
//! prototype.

use crate::config::CompressionConfig;
use crate::error::LtscError;
use crate::swap::ReplacementMap;
use crate::token::Token;
use crate::types::DictionaryMap;

/// Mint the length token for a dictionary entry of `length` tokens.
pub fn length_token<T: Token>(length: usize, cfg: &CompressionConfig) -> T {
    T::synthesize(format!(
        "{}{}{}",
        cfg.dict_length_prefix, length, cfg.dict_length_suffix
    ))
}

/// Parse a length token back into its integer value.
pub fn parse_length_token<T: Token>(token: &T, cfg: &CompressionConfig) -> Result<usize, LtscError> {
    let s = token.token_str().ok_or_else(|| LtscError::MalformedFrame {
        reason: "length token is not string-representable".to_string(),
    })?;
    let inner = s
        .strip_prefix(cfg.dict_length_prefix.as_str())
        .and_then(|rest| rest.strip_suffix(cfg.dict_length_suffix.as_str()))
        .ok_or_else(|| LtscError::MalformedFrame {
            reason: format!("{s:?} is not a valid length token"),
        })?;
    inner.parse::<usize>().map_err(|_| LtscError::MalformedFrame {
        reason: format!("{s:?} does not carry a valid integer length"),
    })
}

/// Emit `dict_start_token [meta [len]? subsequence...]* dict_end_token`, in
/// dictionary-map insertion order.
pub fn build_dictionary_tokens<T: Token>(
    dictionary_map: &DictionaryMap<T>,
    cfg: &CompressionConfig,
) -> Vec<T> {
    let mut tokens = vec![T::synthesize(cfg.dict_start_token.clone())];
    for (meta, subseq) in dictionary_map {
        tokens.push(meta.clone());
        if cfg.dict_length_enabled {
            tokens.push(length_token(subseq.len(), cfg));
        }
        tokens.extend(subseq.iter().cloned());
    }
    tokens.push(T::synthesize(cfg.dict_end_token.clone()));
    tokens
}

/// Walk `tokens` by index; at each index, a miss in `replacements` copies one
/// token and advances by 1, while a hit emits the replacement meta-token and
/// advances by the consumed length.
pub fn build_body_tokens<T: Token>(tokens: &[T], replacements: &ReplacementMap<T>) -> Vec<T> {
    let mut body = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        match replacements.get(&idx) {
            Some((length, meta)) => {
                body.push(meta.clone());
                idx += length;
            }
            None => {
                body.push(tokens[idx].clone());
                idx += 1;
            }
        }
    }
    body
}
