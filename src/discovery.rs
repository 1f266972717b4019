//! Component B: candidate discovery.
//!
//! Enumerates every contiguous subsequence of length `2..=max_subsequence_length`
//! that occurs at least twice with a non-overlapping occurrence count
//! satisfying the compressibility predicate (`spec.md` §4.B). Grounded on
//! `original_source/small/discovery.py`'s `discover_candidates` for exact
//! semantics (enumeration order, non-overlap selection) and
//! `discovery_parallel.py` for the optional parallel variant, which
//! `spec.md` §5 explicitly permits as long as the merged candidate set
//! matches the sequential one as an unordered multiset.

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::config::CompressionConfig;
use crate::token::Token;
use crate::types::Candidate;

/// The compressibility predicate from `spec.md` §4.B: replacing `count`
/// non-overlapping copies of a length-`length` subsequence only pays off if
/// the tokens removed (`length * count`) exceed the header cost paid once
/// (`1` meta-token + `length` subsequence tokens + `extra` optional length
/// token) plus one meta-token insertion per occurrence (`count`).
#[inline]
pub fn is_compressible(length: usize, count: usize, extra: usize) -> bool {
    length
        .checked_mul(count)
        .is_some_and(|removed| removed > 1 + length + extra + count)
}

/// Greedily retains the maximum-cardinality non-overlapping subset of
/// ascending `positions` for a subsequence of the given `length`: keep a
/// position iff it is at or past the end of the previously kept one.
fn non_overlapping_positions(positions: &[usize], length: usize) -> Vec<usize> {
    let mut selected = Vec::new();
    let mut next_free: i64 = -1;
    for &pos in positions {
        if pos as i64 >= next_free {
            selected.push(pos);
            next_free = pos as i64 + length as i64;
        }
    }
    selected
}

/// Enumerate all candidates for a single subsequence length, in "first
/// encountered" order. Shared by the sequential and parallel entry points.
fn discover_for_length<T: Token>(
    tokens: &[T],
    length: usize,
    extra: usize,
) -> Vec<Candidate<T>> {
    let n = tokens.len();
    if length > n {
        return Vec::new();
    }
    let limit = n - length + 1;
    let mut positions_by_subseq: IndexMap<&[T], Vec<usize>> = IndexMap::new();
    for idx in 0..limit {
        let window = &tokens[idx..idx + length];
        positions_by_subseq.entry(window).or_default().push(idx);
    }

    let mut out = Vec::new();
    for (subseq, positions) in positions_by_subseq {
        let kept = non_overlapping_positions(&positions, length);
        if is_compressible(length, kept.len(), extra) {
            out.push(Candidate::new(subseq.to_vec(), kept));
        }
    }
    out
}

/// Sequential discovery. Lengths are processed from `max_subsequence_length`
/// down to 2; within a length, candidates are produced in first-encountered
/// order. Returns an empty vector (not an error) when
/// `max_subsequence_length < 2` or the sequence is too short.
pub fn discover_candidates<T: Token>(
    tokens: &[T],
    cfg: &CompressionConfig,
) -> Vec<Candidate<T>> {
    if cfg.max_subsequence_length < 2 {
        return Vec::new();
    }
    let extra = cfg.length_extra_cost();
    let max_len = cfg.max_subsequence_length.min(tokens.len());
    let mut candidates = Vec::new();
    for length in (2..=max_len).rev() {
        candidates.extend(discover_for_length(tokens, length, extra));
    }
    tracing::debug!(count = candidates.len(), "discovery: sequential pass");
    candidates
}

/// Parallel discovery across distinct lengths via `rayon`. The contents of
/// the returned `Vec` match [`discover_candidates`] as an unordered
/// multiset; the emission order across lengths is not guaranteed (each
/// length's internal worker still produces "first encountered" order for
/// that length, since `discover_for_length` itself is sequential).
///
/// Intended for large inputs where the per-length fork/join cost is
/// amortised; selection, swap, and framing remain strictly sequential
/// downstream, per `spec.md` §5.
pub fn discover_candidates_parallel<T: Token + Send + Sync>(
    tokens: &[T],
    cfg: &CompressionConfig,
) -> Vec<Candidate<T>> {
    if cfg.max_subsequence_length < 2 {
        return Vec::new();
    }
    let extra = cfg.length_extra_cost();
    let max_len = cfg.max_subsequence_length.min(tokens.len());
    let lengths: Vec<usize> = (2..=max_len).collect();
    let candidates: Vec<Candidate<T>> = lengths
        .par_iter()
        .flat_map(|&length| discover_for_length(tokens, length, extra))
        .collect();
    tracing::debug!(count = candidates.len(), "discovery: parallel pass");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CompressionConfig {
        CompressionConfig {
            max_subsequence_length: 3,
            ..Default::default()
        }
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn predicate_matches_spec_examples() {
        // length=3, count=3: removed=9, header=1+3+1+3=8, 9>8 -> compressible.
        assert!(is_compressible(3, 3, 1));
        // length=2, count=2: removed=4, header=1+2+1+2=6, 4>6 -> false.
        assert!(!is_compressible(2, 2, 1));
        // length=2, count=4: removed=8, header=1+2+1+4=8, 8>8 -> false (tie, not compressible).
        assert!(!is_compressible(2, 4, 1));
        // length=2, count=5: removed=10 > 9 -> compressible.
        assert!(is_compressible(2, 5, 1));
    }

    #[test]
    fn non_overlapping_positions_keeps_maximum_cardinality() {
        // positions 0,1,2,3 with length 2: keep 0,2 (greedy).
        assert_eq!(non_overlapping_positions(&[0, 1, 2, 3], 2), vec![0, 2]);
        assert_eq!(non_overlapping_positions(&[0, 3, 4], 3), vec![0, 4]);
    }

    #[test]
    fn discovers_repeated_triple() {
        let tokens = toks(&["a", "b", "c", "a", "b", "c", "a", "b", "c", "z"]);
        let candidates = discover_candidates(&tokens, &cfg());
        let abc = candidates
            .iter()
            .find(|c| c.subsequence == toks(&["a", "b", "c"]))
            .expect("abc candidate present");
        assert_eq!(abc.positions, vec![0, 3, 6]);
    }

    #[test]
    fn empty_result_when_length_too_small() {
        let tokens = toks(&["a", "b", "c"]);
        let cfg = CompressionConfig {
            max_subsequence_length: 1,
            ..Default::default()
        };
        assert!(discover_candidates(&tokens, &cfg).is_empty());
    }

    #[test]
    fn no_repetition_yields_no_candidates() {
        let tokens = toks(&["a", "b", "c", "d", "e"]);
        assert!(discover_candidates(&tokens, &cfg()).is_empty());
    }

    #[test]
    fn parallel_matches_sequential_as_multiset() {
        let tokens = toks(&[
            "a", "b", "a", "b", "a", "b", "c", "d", "c", "d", "c", "d",
        ]);
        let cfg = CompressionConfig {
            max_subsequence_length: 2,
            ..Default::default()
        };
        let mut seq: Vec<_> = discover_candidates(&tokens, &cfg)
            .into_iter()
            .map(|c| (c.subsequence, c.positions))
            .collect();
        let mut par: Vec<_> = discover_candidates_parallel(&tokens, &cfg)
            .into_iter()
            .map(|c| (c.subsequence, c.positions))
            .collect();
        seq.sort();
        par.sort();
        assert_eq!(seq, par);
    }
}
