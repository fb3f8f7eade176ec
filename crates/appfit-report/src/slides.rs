//! Slide-row export.
//!
//! The deck itself is drawn elsewhere; this module produces the row model
//! it consumes — one JSON file per (domain, subdomain) with the icon
//! flags, the truncated technology text and the verdict icons.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use appfit_model::{CriteriaMap, Criterion, Record};
use appfit_normalize::normalize;
use appfit_recon::EvaluatedApp;

use crate::error::{ReportError, Result};

/// Longest technology string rendered before ellipsis.
const TECH_TRUNCATE_LENGTH: usize = 33;

/// Customization levels that draw the COTS icon.
const COTS_LEVELS: [&str; 2] = ["cots", "cots con observacion"];

#[derive(Debug, Clone, Serialize)]
pub struct VerdictCell {
    pub criterion: &'static str,
    pub verdict: &'static str,
    pub icon: Option<&'static str>,
}

/// One row of an assessment slide.
#[derive(Debug, Clone, Serialize)]
pub struct SlideRow {
    pub application: String,
    /// False for applications that stayed pending: the row still renders,
    /// name only.
    pub matched: bool,
    pub sas: bool,
    pub cloud: bool,
    pub cots: bool,
    pub regional: bool,
    pub technology: Option<String>,
    pub verdicts: Vec<VerdictCell>,
}

/// Build the row for a matched, evaluated application.
pub fn slide_row(app: &EvaluatedApp, map: &CriteriaMap) -> SlideRow {
    let record = &app.record;
    SlideRow {
        application: app.entry.application.clone(),
        matched: true,
        sas: icon_value(record, map.icon_sas.as_deref()) == Some("si".into()),
        cloud: icon_value(record, map.icon_cloud.as_deref()) == Some("nube".into()),
        cots: icon_value(record, map.icon_cots.as_deref())
            .is_some_and(|level| COTS_LEVELS.contains(&level.as_str())),
        regional: icon_value(record, map.icon_regional.as_deref())
            .is_some_and(|scope| scope.contains("regional") || scope.contains("global")),
        technology: map
            .tecnologia
            .as_deref()
            .and_then(|column| record.value(column))
            .map(truncate_technology),
        verdicts: app
            .evaluation
            .iter()
            .map(|(criterion, verdict)| VerdictCell {
                criterion: criterion.as_str(),
                verdict: verdict.as_str(),
                icon: verdict.icon_key(),
            })
            .collect(),
    }
}

/// Row for an application that found no match: name only, empty verdicts.
pub fn placeholder_row(application: &str) -> SlideRow {
    SlideRow {
        application: application.to_string(),
        matched: false,
        sas: false,
        cloud: false,
        cots: false,
        regional: false,
        technology: None,
        verdicts: Criterion::ALL
            .iter()
            .map(|criterion| VerdictCell {
                criterion: criterion.as_str(),
                verdict: "",
                icon: None,
            })
            .collect(),
    }
}

/// Write one JSON file per (domain, subdomain) group under `dir`.
/// Returns the written paths in group order.
pub fn write_slides(
    groups: &BTreeMap<(String, String), Vec<SlideRow>>,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for ((domain, subdomain), rows) in groups {
        let path = dir.join(domain).join(format!("{subdomain}.json"));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(rows).map_err(|source| ReportError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), rows = rows.len(), "slide rows written");
        written.push(path);
    }
    Ok(written)
}

fn icon_value(record: &Record, column: Option<&str>) -> Option<String> {
    column
        .and_then(|column| record.value(column))
        .map(normalize)
}

fn truncate_technology(text: &str) -> String {
    if text.chars().count() > TECH_TRUNCATE_LENGTH {
        let head: String = text.chars().take(TECH_TRUNCATE_LENGTH).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
