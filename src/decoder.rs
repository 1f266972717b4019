//! Component H: the decoder.
//!
//! Parses a framed sequence back into a dictionary map plus body, then
//! expands every body token through the dictionary to recover the original
//! sequence. Grounded on `original_source/small/compressor.py::decompress`
//! for the parsing contract, extended with the length-framing parse path
//! `spec.md` §4.H.5 adds on top of the original delimiter-scanning
//! prototype (§4.H.6, preserved for `dict_length_enabled: false`).
//!
//! Expansion is iterative (an explicit work stack), not recursive, per the
//! design note in `spec.md` §9 — pathological inputs could otherwise blow
//! the native call stack during hierarchical expansion.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::CompressionConfig;
use crate::error::LtscError;
use crate::framing::parse_length_token;
use crate::token::{is_meta_token, Token};
use crate::types::DictionaryMap;

/// Parsed dictionary region plus the body region that follows it.
struct ParsedFrame<T> {
    dictionary_map: DictionaryMap<T>,
    body_tokens: Vec<T>,
}

fn parse_length_framed<T: Token>(
    dict_region: &[T],
    cfg: &CompressionConfig,
) -> Result<DictionaryMap<T>, LtscError> {
    let mut map = DictionaryMap::new();
    let mut idx = 0;
    while idx < dict_region.len() {
        let meta = &dict_region[idx];
        if !is_meta_token(meta, cfg) {
            return Err(LtscError::MissingMetaHeader {
                index: idx,
                token: format!("{meta:?}"),
            });
        }
        if map.contains_key(meta) {
            return Err(LtscError::DuplicateMeta {
                meta_token: format!("{meta:?}"),
            });
        }
        idx += 1;
        let length_tok = dict_region.get(idx).ok_or_else(|| LtscError::MissingLengthToken {
            index: idx,
            meta_token: format!("{meta:?}"),
        })?;
        let length = parse_length_token(length_tok, cfg).map_err(|_| {
            LtscError::MissingLengthToken {
                index: idx,
                meta_token: format!("{meta:?}"),
            }
        })?;
        idx += 1;
        let available = dict_region.len().saturating_sub(idx);
        if length > available {
            return Err(LtscError::TruncatedEntry {
                meta_token: format!("{meta:?}"),
                declared_length: length,
                available,
            });
        }
        if length == 0 {
            return Err(LtscError::EmptyEntry {
                meta_token: format!("{meta:?}"),
            });
        }
        let expansion = dict_region[idx..idx + length].to_vec();
        idx += length;
        map.insert(meta.clone(), expansion);
    }
    Ok(map)
}

fn parse_delimited<T: Token>(
    dict_region: &[T],
    cfg: &CompressionConfig,
) -> Result<DictionaryMap<T>, LtscError> {
    let mut map = DictionaryMap::new();
    let mut current_meta: Option<&T> = None;
    for (idx, token) in dict_region.iter().enumerate() {
        if is_meta_token(token, cfg) {
            if map.contains_key(token) {
                return Err(LtscError::DuplicateMeta {
                    meta_token: format!("{token:?}"),
                });
            }
            map.insert(token.clone(), Vec::new());
            current_meta = Some(token);
            continue;
        }
        match current_meta {
            Some(meta) => {
                map.get_mut(meta).expect("meta was just inserted").push(token.clone());
            }
            None => {
                return Err(LtscError::MissingMetaHeader {
                    index: idx,
                    token: format!("{token:?}"),
                })
            }
        }
    }
    for (meta, expansion) in &map {
        if expansion.is_empty() {
            return Err(LtscError::EmptyEntry {
                meta_token: format!("{meta:?}"),
            });
        }
    }
    Ok(map)
}

/// Split `frame` into its dictionary map and body tokens. Returns
/// `MalformedFrame` if the leading/trailing delimiters are absent.
fn parse_frame<T: Token>(
    frame: &[T],
    cfg: &CompressionConfig,
) -> Result<ParsedFrame<T>, LtscError> {
    if frame.is_empty() {
        return Ok(ParsedFrame {
            dictionary_map: DictionaryMap::new(),
            body_tokens: Vec::new(),
        });
    }
    let starts_with_delim = frame[0]
        .token_str()
        .is_some_and(|s| s == cfg.dict_start_token);
    if !starts_with_delim {
        return Err(LtscError::MalformedFrame {
            reason: "frame does not start with the dictionary start delimiter".to_string(),
        });
    }
    let end_idx = frame
        .iter()
        .position(|t| t.token_str().is_some_and(|s| s == cfg.dict_end_token))
        .ok_or_else(|| LtscError::MalformedFrame {
            reason: "frame is missing the dictionary end delimiter".to_string(),
        })?;

    let dict_region = &frame[1..end_idx];
    let body_tokens = frame[end_idx + 1..].to_vec();
    let dictionary_map = if cfg.dict_length_enabled {
        parse_length_framed(dict_region, cfg)?
    } else {
        parse_delimited(dict_region, cfg)?
    };
    Ok(ParsedFrame {
        dictionary_map,
        body_tokens,
    })
}

/// Fully expand every meta-token in `dictionary_map` to its primitive-token
/// closure, iteratively and with memoisation, in topological order. Raises
/// [`LtscError::CyclicDictionary`] if a cycle is detected (defensive; I6
/// guarantees this cannot happen for dictionaries this crate produced).
fn expand_all<T: Token>(dictionary_map: &DictionaryMap<T>) -> Result<IndexMap<T, Vec<T>>, LtscError> {
    let mut memo: IndexMap<T, Vec<T>> = IndexMap::new();

    for root in dictionary_map.keys() {
        if memo.contains_key(root) {
            continue;
        }
        // Iterative post-order traversal: `stack` holds (token, visited).
        let mut stack: Vec<(T, bool)> = vec![(root.clone(), false)];
        let mut on_path: HashSet<T> = HashSet::new();

        while let Some((token, expanded_children)) = stack.pop() {
            if memo.contains_key(&token) {
                continue;
            }
            if !expanded_children {
                if on_path.contains(&token) {
                    return Err(LtscError::CyclicDictionary {
                        meta_token: format!("{token:?}"),
                    });
                }
                on_path.insert(token.clone());
                stack.push((token.clone(), true));
                if let Some(expansion) = dictionary_map.get(&token) {
                    for child in expansion {
                        if dictionary_map.contains_key(child) && !memo.contains_key(child) {
                            stack.push((child.clone(), false));
                        }
                    }
                }
            } else {
                on_path.remove(&token);
                let expansion = dictionary_map
                    .get(&token)
                    .expect("token came from dictionary_map keys or values");
                let mut resolved = Vec::with_capacity(expansion.len());
                for child in expansion {
                    match memo.get(child) {
                        Some(expanded) => resolved.extend(expanded.iter().cloned()),
                        None => resolved.push(child.clone()),
                    }
                }
                memo.insert(token, resolved);
            }
        }
    }

    Ok(memo)
}

/// Decode a framed token sequence back into the original token sequence.
pub fn decode<T: Token>(frame: &[T], cfg: &CompressionConfig) -> Result<Vec<T>, LtscError> {
    let parsed = parse_frame(frame, cfg)?;
    let memo = expand_all(&parsed.dictionary_map)?;
    let mut out = Vec::with_capacity(parsed.body_tokens.len());
    for token in &parsed.body_tokens {
        match memo.get(token) {
            Some(expanded) => out.extend(expanded.iter().cloned()),
            None => out.push(token.clone()),
        }
    }
    Ok(out)
}
