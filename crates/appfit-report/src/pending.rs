//! Pending-list persistence and the suggestion report.
//!
//! The pending file is both an output for analysts and an input to the
//! suggestion search, so writing and parsing live together and are tested
//! as a round trip. Lines use the same quoted-triple shape as roster
//! files; `---` banner lines are ignored by the parser.

use std::fs;
use std::path::Path;

use chrono::Local;

use appfit_model::PendingEntry;

use crate::error::{ReportError, Result};

/// Write the pending entries, one quoted triple per line.
pub fn write_pending(entries: &[PendingEntry], path: &Path) -> Result<()> {
    let mut out = String::new();
    out.push_str(&format!(
        "--- pendientes {} ---\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    for entry in entries {
        out.push_str(&format!(
            "\"{}\" \"{}\" \"{}\"\n",
            entry.country, entry.bank, entry.application
        ));
    }
    write_file(path, &out)
}

/// Parse a pending file back into entries.
pub fn parse_pending(path: &Path) -> Result<Vec<PendingEntry>> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("---") {
            continue;
        }
        // Quoted fields sit at the odd indices of a split on '"'.
        let fields: Vec<&str> = line
            .split('"')
            .enumerate()
            .filter(|(index, _)| index % 2 == 1)
            .map(|(_, field)| field)
            .collect();
        if fields.len() == 3 {
            entries.push(PendingEntry::new(fields[0], fields[1], fields[2]));
        }
    }
    Ok(entries)
}

/// Suggestion results for one staged table.
#[derive(Debug, Clone)]
pub struct SuggestionSection {
    /// Table the suggestions were searched in.
    pub table: String,
    /// Per pending name, the possible matches found (empty hits omitted
    /// from the report).
    pub findings: Vec<(String, Vec<String>)>,
}

/// Write the suggestion report in its banner format.
pub fn write_suggestions(sections: &[SuggestionSection], path: &Path) -> Result<()> {
    let mut out = String::new();
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&"=".repeat(40));
        out.push('\n');
        out.push_str(&format!(" SUGERENCIAS PARA: {}\n", section.table));
        out.push_str(&"=".repeat(40));
        out.push('\n');
        for (pending, matches) in &section.findings {
            if matches.is_empty() {
                continue;
            }
            out.push_str(&format!("\n--- PENDIENTE: \"{pending}\" ---\n"));
            for candidate in matches {
                out.push_str(&format!("  -> POSIBLE MATCH: \"{candidate}\"\n"));
            }
        }
    }
    write_file(path, &out)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
