//! Input-list ("roster") discovery and parsing.
//!
//! Roster files are plain text, one application per line, three
//! double-quoted fields: country, source tag, application name. They are
//! organized as `<inputs>/<domain>/<subdomain>.txt`; the directory and
//! file names become the grouping keys of the compliance report.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{IngestError, Result};

static QUOTED_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid quoted-field regex"));

/// One input line, with the domain/subdomain context of its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub domain: String,
    pub subdomain: String,
    pub country: String,
    pub bank_tag: String,
    pub application: String,
}

/// Recursively list the `.txt` roster files under `dir`, sorted by path
/// for a deterministic batch order.
pub fn discover_roster_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    collect_txt_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_txt_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_txt_files(&path, files)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Parse every roster file under `dir` into entries.
///
/// Blank lines and `---` banner lines are skipped; lines without exactly
/// three quoted fields are diagnosed and skipped — one bad line never
/// aborts the batch.
pub fn read_roster(dir: &Path) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();
    for path in discover_roster_files(dir)? {
        let text = fs::read_to_string(&path).map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;

        let domain = domain_of(dir, &path);
        let subdomain = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_lowercase();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("---") {
                continue;
            }
            let fields: Vec<&str> = QUOTED_FIELDS
                .captures_iter(line)
                .filter_map(|captures| captures.get(1))
                .map(|field| field.as_str().trim())
                .collect();
            if fields.len() != 3 {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    "expected three quoted fields, skipping line"
                );
                continue;
            }
            entries.push(RosterEntry {
                domain: domain.clone(),
                subdomain: subdomain.clone(),
                country: fields[0].to_string(),
                bank_tag: fields[1].to_string(),
                application: fields[2].to_string(),
            });
        }
    }
    Ok(entries)
}

/// Domain key: the file's containing directory, lowercased. Files placed
/// directly in the inputs root fall into "general".
fn domain_of(root: &Path, file: &Path) -> String {
    match file.parent() {
        Some(parent) if parent != root => parent
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("general")
            .to_lowercase(),
        _ => "general".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn reads_quoted_triples_with_context() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("Canales/canales_web_retail.txt"),
            "\"Colombia (CO)\" \"BuyerBank\" \"Portal Clientes\"\n\
             \n\
             \"Panama (PA)\" \"BoughtBank\" \"Core Bancario\"\n",
        );

        let entries = read_roster(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].domain, "canales");
        assert_eq!(entries[0].subdomain, "canales_web_retail");
        assert_eq!(entries[0].country, "Colombia (CO)");
        assert_eq!(entries[0].bank_tag, "BuyerBank");
        assert_eq!(entries[0].application, "Portal Clientes");
        assert_eq!(entries[1].bank_tag, "BoughtBank");
    }

    #[test]
    fn skips_banners_and_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("datos/datos_consumo.txt"),
            "--- seccion ---\n\
             \"Colombia (CO)\" \"BuyerBank\"\n\
             sin comillas\n\
             \"Colombia (CO)\" \"BuyerBank\" \"Data Lake\"\n",
        );

        let entries = read_roster(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].application, "Data Lake");
    }

    #[test]
    fn files_in_root_fall_into_general_domain() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("apps.txt"),
            "\"Colombia (CO)\" \"BuyerBank\" \"Portal\"\n",
        );

        let entries = read_roster(dir.path()).unwrap();
        assert_eq!(entries[0].domain, "general");
        assert_eq!(entries[0].subdomain, "apps");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let error = read_roster(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn discovery_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("b/z.txt"), "");
        write(&dir.path().join("a/y.txt"), "");
        write(&dir.path().join("a/x.TXT"), "");
        write(&dir.path().join("a/notes.md"), "");

        let files = discover_roster_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a/x.TXT", "a/y.txt", "b/z.txt"]);
    }
}
