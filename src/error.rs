//! Crate-wide error taxonomy.
//!
//! One variant per row of `spec.md` §7's error table. Grounded on the
//! `QCompressError` / `ErrorKind` split in `mwlon-pcodec/src/errors.rs`, but
//! collapsed into a single enum: every kind here already carries the
//! structured diagnostic data pcodec instead serialises into a free-text
//! `message` field (offending index, offending token's `Debug` rendering,
//! expected vs. found lengths), so a wrapper struct would only add an
//! indirection.

use std::fmt;

/// All errors this crate can return. No variant is retried internally and no
/// partial result is ever returned alongside an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LtscError {
    /// Input contains a delimiter, meta-token, or length-token pattern.
    ReservedToken { index: usize, token: String },
    /// Configuration could not be interpreted.
    Config { message: String },
    /// Frame does not begin with `dict_start_token`, or is missing
    /// `dict_end_token` entirely.
    MalformedFrame { reason: String },
    /// A non-meta token appeared where a meta-token header was expected.
    MissingMetaHeader { index: usize, token: String },
    /// Length framing is enabled but a length token was absent after a
    /// meta-token header.
    MissingLengthToken { index: usize, meta_token: String },
    /// The same meta-token is defined twice in the dictionary region.
    DuplicateMeta { meta_token: String },
    /// A declared entry length overruns the remaining dictionary region.
    TruncatedEntry {
        meta_token: String,
        declared_length: usize,
        available: usize,
    },
    /// A dictionary entry resolves to zero tokens.
    EmptyEntry { meta_token: String },
    /// The expansion graph contains a cycle (defensive check; should be
    /// unreachable for dictionaries this crate produced itself, since I6
    /// guarantees acyclicity).
    CyclicDictionary { meta_token: String },
    /// `compress` was configured with `verify: true` and the round-trip
    /// through `decompress` did not reproduce the input.
    Verification { mismatch_index: Option<usize> },
}

impl fmt::Display for LtscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LtscError::ReservedToken { index, token } => write!(
                f,
                "reserved token {token} found in input at index {index}"
            ),
            LtscError::Config { message } => write!(f, "invalid configuration: {message}"),
            LtscError::MalformedFrame { reason } => write!(f, "malformed frame: {reason}"),
            LtscError::MissingMetaHeader { index, token } => write!(
                f,
                "expected meta-token header at dictionary offset {index}, found {token}"
            ),
            LtscError::MissingLengthToken { index, meta_token } => write!(
                f,
                "missing length token after meta-token {meta_token} at dictionary offset {index}"
            ),
            LtscError::DuplicateMeta { meta_token } => {
                write!(f, "duplicate meta-token {meta_token} in dictionary")
            }
            LtscError::TruncatedEntry {
                meta_token,
                declared_length,
                available,
            } => write!(
                f,
                "entry for {meta_token} declares length {declared_length} but only {available} tokens remain in the dictionary region"
            ),
            LtscError::EmptyEntry { meta_token } => {
                write!(f, "entry for {meta_token} resolves to zero tokens")
            }
            LtscError::CyclicDictionary { meta_token } => write!(
                f,
                "expansion graph contains a cycle reaching {meta_token}"
            ),
            LtscError::Verification { mismatch_index } => match mismatch_index {
                Some(idx) => write!(
                    f,
                    "round-trip verification failed: first mismatch at index {idx}"
                ),
                None => write!(
                    f,
                    "round-trip verification failed: output length differs from input"
                ),
            },
        }
    }
}

impl std::error::Error for LtscError {}
