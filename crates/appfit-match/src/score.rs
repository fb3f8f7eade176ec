//! Token-set similarity scoring.
//!
//! Compares the word sets of two normalized names, insensitive to word
//! order and to one name being a token-superset of the other. The base
//! string similarity is rapidfuzz's indel ratio; the token-set
//! construction mirrors the classic fuzzy-matching formulation: score the
//! sorted intersection against each side's intersection-plus-remainder
//! string and take the best.

use std::collections::BTreeSet;

use rapidfuzz::fuzz;

/// Token-set similarity between two strings, scaled 0–100.
///
/// Inputs are expected to be normalized keys (lowercase,
/// whitespace-separated); the function itself only splits on whitespace.
/// An empty token set on either side scores 0.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side's tokens fully contained in the other's: a reordering or a
    // qualified variant of the same name.
    if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let base = intersection.join(" ");
    let with_a = join_tokens(&base, &only_a);
    let with_b = join_tokens(&base, &only_b);

    // rapidfuzz returns a normalized 0.0–1.0 similarity; this module's
    // contract (and every caller) is a 0–100 scale.
    let sect_vs_a = fuzz::ratio(base.chars(), with_a.chars()) * 100.0;
    let sect_vs_b = fuzz::ratio(base.chars(), with_b.chars()) * 100.0;
    let a_vs_b = fuzz::ratio(with_a.chars(), with_b.chars()) * 100.0;

    sect_vs_a.max(sect_vs_b).max(a_vs_b)
}

fn join_tokens(base: &str, extra: &[&str]) -> String {
    if base.is_empty() {
        extra.join(" ")
    } else if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base} {}", extra.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_set_ratio("portal clientes", "portal clientes"), 100.0);
    }

    #[test]
    fn word_reordering_scores_100() {
        assert_eq!(
            token_set_ratio("clientes portal", "portal clientes"),
            100.0
        );
    }

    #[test]
    fn token_subset_scores_100() {
        // "de" is the only extra token; the overlap is total on one side.
        assert_eq!(
            token_set_ratio("sistema pagos nacional", "sistema de pagos nacional"),
            100.0
        );
    }

    #[test]
    fn near_miss_scores_below_100() {
        let score = token_set_ratio("portal klientes", "portal clientes");
        assert!(score < 100.0, "typo should not be a perfect score: {score}");
        assert!(score > 90.0, "single-letter typo should stay high: {score}");
    }

    #[test]
    fn disjoint_single_tokens_use_plain_ratio() {
        // No shared tokens: "abcd" vs "abce" is one deletion plus one
        // insertion over eight characters, exactly 75.0.
        assert_eq!(token_set_ratio("abcd", "abce"), 75.0);
    }

    #[test]
    fn unrelated_names_score_low() {
        let score = token_set_ratio("sistema xyz inexistente", "portal clientes");
        assert!(score < 50.0, "unrelated names scored {score}");
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(token_set_ratio("", "portal"), 0.0);
        assert_eq!(token_set_ratio("portal", ""), 0.0);
        assert_eq!(token_set_ratio("", ""), 0.0);
        assert_eq!(token_set_ratio("   ", "portal"), 0.0);
    }

    proptest! {
        #[test]
        fn score_is_within_range(a in "[a-z ]{0,30}", b in "[a-z ]{0,30}") {
            let score = token_set_ratio(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn score_is_symmetric(a in "[a-z ]{0,30}", b in "[a-z ]{0,30}") {
            prop_assert_eq!(token_set_ratio(&a, &b), token_set_ratio(&b, &a));
        }

        #[test]
        fn equal_nonempty_strings_score_100(a in "[a-z]{1,10}( [a-z]{1,10}){0,4}") {
            prop_assert_eq!(token_set_ratio(&a, &a), 100.0);
        }
    }
}
