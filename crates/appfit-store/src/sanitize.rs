//! Column-name sanitization for the storage engine.
//!
//! Normalized spreadsheet headers still contain spaces; the store wants
//! plain identifiers bounded by the engine's length limit, and repeated
//! headers must stay distinguishable after sanitization.

use std::collections::BTreeSet;

/// Identifier length limit (MySQL heritage, kept for portability of the
/// staging schema).
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Turn a normalized header into a storage identifier: spaces and hyphens
/// become underscores, the result is truncated to the identifier limit.
pub fn sanitize_column(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { '_' } else { ch })
        .collect();
    replaced.chars().take(MAX_IDENTIFIER_LEN).collect()
}

/// De-duplicate sanitized column names in order.
///
/// The first occurrence keeps its name; repeats get `_1`, `_2`…
/// suffixes, shortening the base where needed so the suffixed name still
/// fits the identifier limit. Suffixed names are themselves checked
/// against the used set, so a literal `x_1` column cannot collide with a
/// generated one.
pub fn dedupe_columns<I>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut result = Vec::new();

    for column in columns {
        let mut candidate = column.clone();
        let mut attempt = 0usize;
        while !used.insert(candidate.clone()) {
            attempt += 1;
            candidate = suffixed(&column, attempt);
        }
        result.push(candidate);
    }
    result
}

fn suffixed(base: &str, n: usize) -> String {
    let suffix = format!("_{n}");
    let keep = MAX_IDENTIFIER_LEN.saturating_sub(suffix.len());
    let head: String = base.chars().take(keep).collect();
    format!("{head}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_hyphens_become_underscores() {
        assert_eq!(
            sanitize_column("nivel de obsolescencia"),
            "nivel_de_obsolescencia"
        );
        assert_eq!(sanitize_column("nube vs on-premise"), "nube_vs_on_premise");
    }

    #[test]
    fn long_names_truncate_to_the_identifier_limit() {
        let long = "x".repeat(100);
        assert_eq!(sanitize_column(&long).len(), MAX_IDENTIFIER_LEN);
    }

    #[test]
    fn repeats_gain_numeric_suffixes() {
        let deduped = dedupe_columns(
            ["nivel_de_obsolescencia", "ux", "nivel_de_obsolescencia"]
                .map(String::from),
        );
        assert_eq!(
            deduped,
            vec!["nivel_de_obsolescencia", "ux", "nivel_de_obsolescencia_1"]
        );
    }

    #[test]
    fn generated_suffixes_dodge_literal_collisions() {
        let deduped = dedupe_columns(["x", "x", "x_1"].map(String::from));
        assert_eq!(deduped, vec!["x", "x_1", "x_1_1"]);
    }

    #[test]
    fn suffixed_names_respect_the_limit() {
        let long = "y".repeat(MAX_IDENTIFIER_LEN);
        let deduped = dedupe_columns([long.clone(), long.clone(), long]);
        for name in &deduped {
            assert!(name.chars().count() <= MAX_IDENTIFIER_LEN);
        }
        assert_eq!(deduped[1].chars().filter(|c| *c == '_').count(), 1);
    }
}
