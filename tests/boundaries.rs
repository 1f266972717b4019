// Integration tests for the boundary behaviours named in spec.md §8.

use ltsc::{compress, decompress, Candidate, CompressionConfig, SelectionMode};

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn empty_input_round_trips_to_empty() {
    let cfg = CompressionConfig::default();
    let tokens: Vec<String> = Vec::new();
    let result = compress(&tokens, &cfg).unwrap();
    assert!(result.frame.is_empty());
    assert!(decompress(&result.frame, &cfg).unwrap().is_empty());
}

#[test]
fn single_token_emits_canonical_empty_dictionary() {
    let cfg = CompressionConfig::default();
    let tokens = toks(&["lonely"]);
    let result = compress(&tokens, &cfg).unwrap();
    assert_eq!(
        result.frame,
        vec![
            cfg.dict_start_token.clone(),
            cfg.dict_end_token.clone(),
            "lonely".to_string(),
        ]
    );
    assert_eq!(decompress(&result.frame, &cfg).unwrap(), tokens);
}

#[test]
fn max_subsequence_length_below_two_disables_discovery() {
    let cfg = CompressionConfig {
        max_subsequence_length: 1,
        ..Default::default()
    };
    let tokens = toks(&["a", "a", "a", "a"]);
    let result = compress(&tokens, &cfg).unwrap();
    assert!(result.dictionary_map.is_empty());
    let mut expected = vec![cfg.dict_start_token.clone(), cfg.dict_end_token.clone()];
    expected.extend(tokens.iter().cloned());
    assert_eq!(result.frame, expected);
}

#[test]
fn pool_exhaustion_leaves_remainder_uncompressed_but_lossless() {
    // Two equally-compressible patterns ("ab" and "cd", each length 2,
    // count 5) compete for a pool of size 1: only one can be allocated, the
    // other's occurrences survive unrewritten in the body.
    let mut tokens = Vec::new();
    for _ in 0..5 {
        tokens.extend(toks(&["a", "b"]));
    }
    for _ in 0..5 {
        tokens.extend(toks(&["c", "d"]));
    }
    let cfg = CompressionConfig {
        max_subsequence_length: 2,
        meta_token_pool_size: 1,
        rng_seed: Some(4),
        ..Default::default()
    };
    let result = compress(&tokens, &cfg).unwrap();
    assert_eq!(result.dictionary_map.len(), 1);
    assert!(result.compressed_length <= tokens.len() + 2);
    assert_eq!(decompress(&result.frame, &cfg).unwrap(), tokens);
}

#[test]
fn beam_mode_round_trips() {
    let cfg = CompressionConfig {
        max_subsequence_length: 3,
        selection_mode: SelectionMode::Beam,
        beam_width: 4,
        rng_seed: Some(21),
        ..Default::default()
    };
    let tokens = toks(&["a", "b", "c", "a", "b", "c", "a", "b", "c", "z"]);
    let result = compress(&tokens, &cfg).unwrap();
    assert_eq!(decompress(&result.frame, &cfg).unwrap(), tokens);
}

#[test]
fn verify_flag_is_satisfied_by_a_correct_pipeline() {
    let cfg = CompressionConfig {
        max_subsequence_length: 5,
        verify: true,
        rng_seed: Some(2),
        ..Default::default()
    };
    let tokens = toks(&["p", "q", "p", "q", "p", "q", "p", "q", "r"]);
    assert!(compress(&tokens, &cfg).is_ok());
}

#[test]
fn preferred_candidate_construction_carries_priority() {
    // Exercises the collaborator construction path named in spec.md §6:
    // `Candidate::with_priority` is how an external preferred-candidate
    // source would hand in pre-built candidates to the lower-level
    // discovery/selection/swap API surface, bypassing `compress`.
    let preferred: Candidate<String> =
        Candidate::with_priority(toks(&["a", "b"]), vec![0, 2], 100);
    assert_eq!(preferred.priority, 100);
    assert_eq!(preferred.length, 2);
}
