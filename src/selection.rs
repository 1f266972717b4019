//! Component C: occurrence selection.
//!
//! Expands candidates into concrete [`Occurrence`]s and picks a
//! non-overlapping subset under one of three strategies, then re-applies
//! the compressibility predicate to the *actually selected* per-subsequence
//! counts. Grounded on `original_source/small/selection.py`
//! (`_build_occurrences`, `_non_overlapping`, `_weighted_interval_scheduling`,
//! `_beam_search`, `select_occurrences`) for exact tie-breaking and DP
//! semantics.

use std::collections::HashMap;

use crate::config::{CompressionConfig, SelectionMode};
use crate::discovery::is_compressible;
use crate::types::{Candidate, Occurrence};

/// One Occurrence per `(candidate, position)` pair, carrying the candidate's
/// priority.
fn build_occurrences<T: Clone>(candidates: &[Candidate<T>]) -> Vec<Occurrence<T>> {
    let mut occurrences = Vec::new();
    for candidate in candidates {
        for &pos in &candidate.positions {
            occurrences.push(Occurrence {
                start: pos,
                length: candidate.length,
                subsequence: candidate.subsequence.clone(),
                priority: candidate.priority,
            });
        }
    }
    occurrences
}

/// Sort by `(-priority, start, length)` and sweep, accepting an occurrence
/// iff it starts at or after the end of the last accepted one.
fn select_greedy<T: Clone>(mut occurrences: Vec<Occurrence<T>>) -> Vec<Occurrence<T>> {
    occurrences.sort_by(|a, b| {
        (-a.priority, a.start, a.length).cmp(&(-b.priority, b.start, b.length))
    });
    let mut selected = Vec::new();
    let mut next_free: i64 = -1;
    for occ in occurrences {
        if occ.start as i64 >= next_free {
            next_free = occ.end() as i64;
            selected.push(occ);
        }
    }
    selected
}

/// Weighted interval scheduling: per-occurrence weight is `length - 1 +
/// priority` (net body savings from one placement, header cost amortised
/// separately by the post-filter). Ties favour the "take" branch only on
/// strict improvement.
fn select_optimal<T: Clone>(occurrences: Vec<Occurrence<T>>) -> Vec<Occurrence<T>> {
    if occurrences.is_empty() {
        return Vec::new();
    }
    let mut occs = occurrences;
    occs.sort_by_key(|o| (o.end(), o.start));

    let ends: Vec<usize> = occs.iter().map(|o| o.end()).collect();
    let n = occs.len();

    // p[i] = greatest index < i whose end <= occs[i].start, or None.
    let mut p: Vec<Option<usize>> = Vec::with_capacity(n);
    for occ in &occs {
        let mut lo: i64 = 0;
        let mut hi: i64 = p.len() as i64 - 1;
        let mut found: Option<usize> = None;
        while lo <= hi {
            let mid = ((lo + hi) / 2) as usize;
            if ends[mid] <= occ.start {
                found = Some(mid);
                lo = mid as i64 + 1;
            } else {
                hi = mid as i64 - 1;
            }
        }
        p.push(found);
    }

    let weights: Vec<i64> = occs
        .iter()
        .map(|o| o.length as i64 - 1 + o.priority)
        .collect();
    let mut dp = vec![0i64; n];
    let mut choose = vec![false; n];
    for i in 0..n {
        let take = weights[i] + p[i].map_or(0, |j| dp[j]);
        let skip = if i > 0 { dp[i - 1] } else { 0 };
        if take > skip {
            dp[i] = take;
            choose[i] = true;
        } else {
            dp[i] = skip;
            choose[i] = false;
        }
    }

    let mut selected = Vec::new();
    let mut i = n as i64 - 1;
    while i >= 0 {
        let idx = i as usize;
        if choose[idx] {
            selected.push(idx);
            i = match p[idx] {
                Some(j) => j as i64,
                None => -1,
            };
        } else {
            i -= 1;
        }
    }
    selected.reverse();
    // Consume occs out of order; take ownership via indices, preserving occs.
    let mut occs_opt: Vec<Option<Occurrence<T>>> = occs.into_iter().map(Some).collect();
    selected
        .into_iter()
        .map(|idx| occs_opt[idx].take().expect("each index selected once"))
        .collect()
}

#[derive(Clone)]
struct BeamState {
    score: i64,
    last_end: i64,
    picks: Vec<usize>,
}

/// Bounded-width beam search over skip/take branches, ranked by score
/// descending then by smaller `last_end` (more future flexibility).
fn select_beam<T: Clone>(occurrences: Vec<Occurrence<T>>, width: usize) -> Vec<Occurrence<T>> {
    if occurrences.is_empty() {
        return Vec::new();
    }
    let mut occs = occurrences;
    occs.sort_by_key(|o| (o.start, o.length));

    let width = width.max(1);
    let mut states: Vec<BeamState> = vec![BeamState {
        score: 0,
        last_end: -1,
        picks: Vec::new(),
    }];

    for (idx, occ) in occs.iter().enumerate() {
        let mut next_states = Vec::with_capacity(states.len() * 2);
        for state in &states {
            // skip
            next_states.push(state.clone());
            // take
            if occ.start as i64 >= state.last_end {
                let mut picks = state.picks.clone();
                picks.push(idx);
                next_states.push(BeamState {
                    score: state.score + occ.length as i64 - 1 + occ.priority,
                    last_end: occ.end() as i64,
                    picks,
                });
            }
        }
        next_states.sort_by(|a, b| b.score.cmp(&a.score).then(a.last_end.cmp(&b.last_end)));
        next_states.truncate(width);
        states = next_states;
    }

    states.sort_by(|a, b| b.score.cmp(&a.score));
    let best = &states[0];
    best.picks.iter().map(|&idx| occs[idx].clone()).collect()
}

/// Group selected occurrences by subsequence and drop any group whose
/// actually-selected count no longer satisfies the compressibility
/// predicate (selection can reduce a candidate's effective multiplicity
/// below break-even).
fn filter_by_compressibility<T: Clone + Eq + std::hash::Hash>(
    occurrences: Vec<Occurrence<T>>,
    cfg: &CompressionConfig,
) -> Vec<Occurrence<T>> {
    let extra = cfg.length_extra_cost();
    let mut groups: HashMap<Vec<T>, Vec<Occurrence<T>>> = HashMap::new();
    for occ in occurrences {
        groups.entry(occ.subsequence.clone()).or_default().push(occ);
    }
    let mut out = Vec::new();
    for (subseq, occs) in groups {
        if is_compressible(subseq.len(), occs.len(), extra) {
            out.extend(occs);
        }
    }
    out.sort_by_key(|o| o.start);
    out
}

/// Runs the configured selection strategy over `candidates`, then the shared
/// compressibility post-filter.
pub fn select_occurrences<T: Clone + Eq + std::hash::Hash>(
    candidates: &[Candidate<T>],
    cfg: &CompressionConfig,
) -> Vec<Occurrence<T>> {
    let occurrences = build_occurrences(candidates);
    let selected = match cfg.selection_mode {
        SelectionMode::Greedy => select_greedy(occurrences),
        SelectionMode::Optimal => select_optimal(occurrences),
        SelectionMode::Beam => select_beam(occurrences, cfg.beam_width),
    };
    let filtered = filter_by_compressibility(selected, cfg);
    tracing::debug!(
        mode = ?cfg.selection_mode,
        selected = filtered.len(),
        "selection: occurrences kept after compressibility post-filter"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(start: usize, length: usize, subseq: &str, priority: i64) -> Occurrence<String> {
        Occurrence {
            start,
            length,
            subsequence: vec![subseq.to_string()],
            priority,
        }
    }

    #[test]
    fn greedy_is_non_overlapping() {
        let occs = vec![occ(0, 3, "x", 0), occ(2, 3, "y", 0), occ(3, 3, "z", 0)];
        let selected = select_greedy(occs);
        for pair in selected.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn greedy_prefers_higher_priority_on_tie() {
        let occs = vec![occ(0, 3, "low", 0), occ(0, 3, "high", 5)];
        let selected = select_greedy(occs);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].subsequence, vec!["high".to_string()]);
    }

    #[test]
    fn optimal_selects_non_overlapping_subset() {
        let occs = vec![
            occ(0, 3, "a", 0),
            occ(1, 3, "b", 0),
            occ(3, 3, "c", 0),
        ];
        let selected = select_optimal(occs);
        for pair in selected.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
        assert!(!selected.is_empty());
    }

    #[test]
    fn optimal_beats_greedy_on_adversarial_overlap() {
        // A long low-value span overlapping two short high-value spans:
        // greedy (sorted by start) takes the long span first and blocks both
        // short ones; optimal should prefer the pair.
        let occs = vec![
            Occurrence {
                start: 0,
                length: 5,
                subsequence: vec!["long".to_string()],
                priority: 0,
            },
            Occurrence {
                start: 0,
                length: 2,
                subsequence: vec!["short_a".to_string()],
                priority: 10,
            },
            Occurrence {
                start: 3,
                length: 2,
                subsequence: vec!["short_b".to_string()],
                priority: 10,
            },
        ];
        let selected = select_optimal(occs);
        let total_priority: i64 = selected.iter().map(|o| o.priority).sum();
        assert_eq!(total_priority, 20);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn beam_respects_width_and_is_non_overlapping() {
        let occs = vec![occ(0, 2, "a", 0), occ(1, 2, "b", 0), occ(2, 2, "c", 0)];
        let selected = select_beam(occs, 2);
        for pair in selected.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn post_filter_drops_subsequence_below_breakeven() {
        let cfg = CompressionConfig::default();
        // Single occurrence of a length-2 subsequence never clears the
        // compressibility predicate (1*... always <= header cost).
        let occs = vec![occ(0, 2, "x", 0)];
        assert!(filter_by_compressibility(occs, &cfg).is_empty());
    }
}
