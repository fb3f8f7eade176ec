//! Canonicalization of free-text application names into comparison keys.
//!
//! Inventory spreadsheets and input lists never agree on how an
//! application is written: accents, parenthetical qualifiers, divestiture
//! annotations and stray punctuation all vary between sources. Matching
//! works on the normalized key produced here; the raw name is kept for
//! display.

use deunicode::deunicode;

/// Unicode subscript digits (U+2080..=U+2089). Sheets use them in product
/// names like "CO₂ Monitor"; they become separators, not digits.
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Annotations that carry deal metadata, not identity. Listed longest
/// first so removal order cannot matter.
const NOISE_PHRASES: [&str; 3] = ["incluida en venta", "no tsa", "tsa"];

/// Normalize an application name into its comparison key.
///
/// The transformation, in order: subscript digits to spaces; ASCII
/// transliteration and lowercasing; parenthesized substrings removed with
/// their surrounding whitespace; every character outside lowercase ASCII
/// letters, digits, whitespace and hyphen removed; noise phrases deleted;
/// whitespace trimmed and collapsed.
///
/// Pure and total: any input produces a key, possibly empty. Idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let despaced: String = text
        .chars()
        .map(|ch| if SUBSCRIPT_DIGITS.contains(&ch) { ' ' } else { ch })
        .collect();

    let ascii = deunicode(&despaced).to_lowercase();
    let unparenthesized = strip_parentheticals(&ascii);

    let filtered: String = unparenthesized
        .chars()
        .filter(|ch| {
            ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace() || *ch == '-'
        })
        .collect();

    strip_noise_phrases(&filtered)
}

/// Remove every `(...)` span together with the whitespace around it,
/// leaving a single separator. An unclosed `(` has no span to remove and
/// falls through to the character filter.
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(rest[..open].trim_end());
                out.push(' ');
                rest = rest[open + close + 1..].trim_start();
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Delete noise phrases and collapse whitespace until nothing changes.
///
/// A single pass is not enough: deleting a phrase can butt the surrounding
/// fragments together into a fresh occurrence ("t" + "sa"), and collapsing
/// a whitespace run can complete a multi-word phrase that was previously
/// split by a double space. Each productive iteration strictly shrinks the
/// string, so the loop terminates.
fn strip_noise_phrases(text: &str) -> String {
    let mut current = collapse_whitespace(text);
    loop {
        let mut replaced = current.clone();
        for phrase in NOISE_PHRASES {
            if replaced.contains(phrase) {
                replaced = replaced.replace(phrase, "");
            }
        }
        let next = collapse_whitespace(&replaced);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
