// Property-based round-trip coverage (spec.md §8, I1) over arbitrary token
// vectors and configurations, complementing the fixed-input unit and
// scenario tests.

use proptest::prelude::*;

use ltsc::{compress, decompress, CompressionConfig, SelectionMode};

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
    // A small alphabet maximises the chance of repeats, which is where the
    // interesting compression/decompression code paths live; reserved
    // patterns ("<Dict>", "<MT_0>", ...) are excluded by construction since
    // the alphabet never contains '<'.
    prop::collection::vec("[a-e]{1,2}", 0..40)
}

fn arb_config() -> impl Strategy<Value = CompressionConfig> {
    (
        2usize..=5,
        prop::bool::ANY,
        1usize..=3,
        prop_oneof![
            Just(SelectionMode::Greedy),
            Just(SelectionMode::Optimal),
            Just(SelectionMode::Beam),
        ],
        1usize..=6,
        any::<u64>(),
        prop::bool::ANY,
    )
        .prop_map(
            |(max_len, hierarchical, depth, mode, beam_width, seed, length_enabled)| {
                CompressionConfig {
                    max_subsequence_length: max_len,
                    hierarchical_enabled: hierarchical,
                    hierarchical_max_depth: depth,
                    selection_mode: mode,
                    beam_width,
                    rng_seed: Some(seed),
                    dict_length_enabled: length_enabled,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    #[test]
    fn round_trip_holds_for_arbitrary_input_and_config(
        tokens in arb_tokens(),
        cfg in arb_config(),
    ) {
        let result = compress(&tokens, &cfg)?;
        let decoded = decompress(&result.frame, &cfg)?;
        prop_assert_eq!(decoded, tokens);
    }

    #[test]
    fn dictionary_closure_holds(tokens in arb_tokens(), cfg in arb_config()) {
        let result = compress(&tokens, &cfg)?;
        for meta in &result.meta_tokens_used {
            prop_assert!(result.dictionary_map.contains_key(meta));
        }
        for expansion in result.dictionary_map.values() {
            prop_assert!(!expansion.is_empty());
            for token in expansion {
                let is_primitive = tokens.contains(token);
                let is_key = result.dictionary_map.contains_key(token);
                prop_assert!(is_primitive || is_key);
            }
        }
    }

    #[test]
    fn determinism_under_fixed_seed_holds(tokens in arb_tokens(), cfg in arb_config()) {
        let r1 = compress(&tokens, &cfg)?;
        let r2 = compress(&tokens, &cfg)?;
        prop_assert_eq!(r1.frame, r2.frame);
    }
}
