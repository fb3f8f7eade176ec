//! Lookup construction and best-match selection.

use std::collections::{BTreeMap, HashSet};

use appfit_normalize::normalize;

use crate::score::token_set_ratio;

/// One bank's lookup set: normalized key to the original inventory name.
///
/// Many raw names can collapse to one key; the last of them wins, which is
/// an accepted lossy step — the surviving spelling is only used to fetch
/// the record row, and duplicate raw names were already collapsed.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    entries: BTreeMap<String, String>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from the distinct names of one inventory.
    ///
    /// Raw duplicates keep their first occurrence (so insertion order
    /// matters only between distinct raw spellings); key collisions
    /// between distinct raw names are last-writer-wins.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut entries = BTreeMap::new();
        for name in names {
            if !seen.insert(name) {
                continue;
            }
            entries.insert(normalize(name), name.to_string());
        }
        Self { entries }
    }

    pub fn insert(&mut self, key: impl Into<String>, original: impl Into<String>) {
        self.entries.insert(key.into(), original.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in lexicographic key order — the order candidate scoring
    /// iterates in.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, original)| (key.as_str(), original.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fuzzy matcher with a tunable acceptance threshold.
///
/// The threshold and the token-set scorer are the contract that decides
/// reconciliation false positives and false negatives; change either only
/// together with the tests that pin them down.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    threshold: f64,
}

impl Matcher {
    /// Default acceptance threshold, scaled 0–100.
    pub const DEFAULT_THRESHOLD: f64 = 90.0;

    pub fn new() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Find the best original name for `raw_name` in `lookup`.
    ///
    /// The normalized input is first tried as an exact key (names already
    /// seen during lookup construction always match themselves,
    /// independent of the threshold). Otherwise every key is scored with
    /// [`token_set_ratio`] and the best is returned when it reaches the
    /// threshold. Ties on the maximum score resolve to the
    /// lexicographically smallest key: iteration follows the `BTreeMap`
    /// key order and a later candidate must score strictly higher to
    /// displace the current best.
    pub fn find_best_match<'a>(&self, raw_name: &str, lookup: &'a Lookup) -> Option<&'a str> {
        let key = normalize(raw_name);

        if let Some(original) = lookup.get(&key) {
            return Some(original);
        }

        let mut best: Option<(&str, f64)> = None;
        for (candidate, original) in lookup.iter() {
            let score = token_set_ratio(&key, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((original, score));
            }
        }

        match best {
            Some((original, score)) if score >= self.threshold => Some(original),
            _ => None,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_of(names: &[&str]) -> Lookup {
        Lookup::from_names(names.iter().copied())
    }

    #[test]
    fn exact_key_short_circuits_threshold() {
        let lookup = lookup_of(&["Portal de Clientes S.A."]);
        // Impossible threshold: only the exact path can return a match.
        let matcher = Matcher::with_threshold(101.0);
        assert_eq!(
            matcher.find_best_match("Portal de Clientes S.A.", &lookup),
            Some("Portal de Clientes S.A.")
        );
        assert_eq!(
            matcher.find_best_match("PORTAL DE CLIENTES s.a.", &lookup),
            Some("Portal de Clientes S.A.")
        );
    }

    #[test]
    fn empty_lookup_never_matches() {
        let matcher = Matcher::new();
        assert_eq!(matcher.find_best_match("anything", &Lookup::new()), None);
    }

    #[test]
    fn reordered_words_match_at_default_threshold() {
        let lookup = lookup_of(&["Sistema de Pagos Nacional"]);
        let matcher = Matcher::new();
        assert_eq!(
            matcher.find_best_match("Pagos Nacional Sistema", &lookup),
            Some("Sistema de Pagos Nacional")
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        // "abcd" vs "abce" has token-set similarity exactly 75.0.
        let mut lookup = Lookup::new();
        lookup.insert("abce", "ABCE");

        assert_eq!(
            Matcher::with_threshold(75.0).find_best_match("abcd", &lookup),
            Some("ABCE")
        );
        assert_eq!(
            Matcher::with_threshold(75.1).find_best_match("abcd", &lookup),
            None
        );
    }

    #[test]
    fn below_threshold_yields_no_match() {
        let lookup = lookup_of(&["Portal Clientes", "Core Bancario"]);
        let matcher = Matcher::new();
        assert_eq!(
            matcher.find_best_match("Sistema XYZ Inexistente", &lookup),
            None
        );
    }

    #[test]
    fn ties_resolve_to_lexicographically_smallest_key() {
        // Both candidates contain all input tokens, so both score 100.
        let lookup = lookup_of(&["Pagos Nacional Beta", "Pagos Nacional Alfa"]);
        let matcher = Matcher::new();
        assert_eq!(
            matcher.find_best_match("Pagos Nacional", &lookup),
            Some("Pagos Nacional Alfa")
        );
    }

    #[test]
    fn key_collisions_are_last_writer_wins() {
        // Both spellings normalize to "portal clientes"; the later entry
        // replaces the earlier one.
        let lookup = Lookup::from_names(["Portal Clientes (CO)", "Portal  Clientes"]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("portal clientes"), Some("Portal  Clientes"));
    }

    #[test]
    fn duplicate_raw_names_keep_first_occurrence() {
        let lookup = Lookup::from_names(["Portal", "Portal"]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("portal"), Some("Portal"));
    }
}
