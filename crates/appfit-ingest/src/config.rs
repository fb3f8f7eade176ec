//! Criteria-map override loading.

use std::fs;
use std::path::Path;

use appfit_model::CriteriaMap;

use crate::error::{IngestError, Result};

/// Load a criteria-map override from a TOML file.
///
/// Keys not present in the file keep their built-in spreadsheet-mapping
/// defaults, so an override only needs to name the columns that differ.
pub fn load_criteria_map(path: &Path) -> Result<CriteriaMap> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| IngestError::CriteriaMap {
        path: path.to_path_buf(),
        source,
    })
}
