//! Property tests for the matching and ranking pipeline.

use proptest::prelude::*;

use typeahead::config::MatchConfig;
use typeahead::distance::distance;
use typeahead::engine::{Candidate, MATCH_CAP, QueryEngine};
use typeahead::matcher::Matcher;

fn matcher_with(threshold: f64, dist: u32) -> Matcher {
    Matcher::new(MatchConfig {
        threshold,
        distance: dist,
        max_pattern_bits: 32,
    })
}

proptest! {
    /// An exact substring present at the anchor is always found at the anchor.
    #[test]
    fn exact_substring_at_anchor_wins(
        prefix in "[a-z]{0,40}",
        pattern in "[a-z]{1,32}",
        suffix in "[a-z]{0,40}",
    ) {
        let text = format!("{prefix}{pattern}{suffix}");
        let anchor = prefix.chars().count();
        let m = Matcher::default();
        let found = m.locate(&text, &pattern, anchor).unwrap();
        // The fast path hits the anchor; text == pattern collapses to 0,
        // which for this construction means the anchor is 0 anyway.
        prop_assert_eq!(found, Some(if text == pattern { 0 } else { anchor }));
    }

    /// A text always matches itself at offset zero, whatever the anchor.
    #[test]
    fn text_matches_itself_at_zero(text in ".{0,60}", anchor in 0usize..200) {
        let m = Matcher::default();
        prop_assert_eq!(m.locate(&text, &text, anchor).unwrap(), Some(0));
    }

    /// Shrinking the threshold can only turn a match into no-match, never
    /// the reverse.
    #[test]
    fn lower_threshold_is_never_more_forgiving(
        text in "[a-c]{1,30}",
        pattern in "[a-c]{1,8}",
        anchor in 0usize..30,
    ) {
        let loose = matcher_with(0.6, 10).locate(&text, &pattern, anchor).unwrap();
        let tight = matcher_with(0.2, 10).locate(&text, &pattern, anchor).unwrap();
        if tight.is_some() {
            prop_assert!(loose.is_some());
        }
    }

    /// Edit distance is symmetric whenever neither side hits the
    /// empty-normalization fallback.
    #[test]
    fn distance_is_symmetric_for_lettered_inputs(
        a in "[a-zA-Z ]*[a-zA-Z][a-zA-Z ]*",
        b in "[a-zA-Z ]*[a-zA-Z][a-zA-Z ]*",
    ) {
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    /// Distance is bounded by the longer normalized input.
    #[test]
    fn distance_never_exceeds_longer_input(
        a in "[a-z]{1,20}",
        b in "[a-z]{1,20}",
    ) {
        let d = distance(&a, &b).unwrap();
        prop_assert!(d <= a.len().max(b.len()));
    }

    /// Evaluation output is sorted ascending and capped per list.
    #[test]
    fn evaluation_is_sorted_and_capped(
        names in prop::collection::vec("[a-d]{1,12}", 0..150),
        query in "[a-d]{1,6}",
    ) {
        let candidates: Vec<Candidate> = names.iter().map(|n| Candidate::new(n.as_str())).collect();
        let engine = QueryEngine::default();
        let results = engine.evaluate(&candidates, &query).unwrap().unwrap();
        prop_assert!(results.len() <= MATCH_CAP);
        prop_assert!(results.windows(2).all(|w| w[0].match_score <= w[1].match_score));
        // Removing any single element keeps the remainder sorted.
        for skip in 0..results.len() {
            let rest: Vec<_> = results
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, m)| m.match_score)
                .collect();
            prop_assert!(rest.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    /// An empty query is a sentinel, never an empty result list.
    #[test]
    fn empty_query_is_a_sentinel(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
        let candidates: Vec<Candidate> = names.iter().map(|n| Candidate::new(n.as_str())).collect();
        let engine = QueryEngine::default();
        prop_assert!(engine.evaluate(&candidates, "").unwrap().is_none());
    }
}

/// Over-long patterns fail identically for any text and anchor that reach
/// the fuzzy path.
#[test]
fn oversized_pattern_fails_regardless_of_text_and_anchor() {
    let m = Matcher::default();
    let pattern: String = std::iter::repeat_n('q', 33).collect();
    for text in ["", "short", "a much longer text that is still unrelated"] {
        for anchor in [0usize, 3, 1000] {
            let result = m.locate(text, &pattern, anchor);
            if text.is_empty() {
                // Empty text short-circuits before the fuzzy path.
                assert_eq!(result.unwrap(), None);
            } else {
                assert!(result.is_err());
            }
        }
    }
}
