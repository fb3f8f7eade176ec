//! Applications that could not be reconciled.

use serde::{Deserialize, Serialize};

/// One input-list entry the matcher found no acceptable match for.
///
/// The source tag is kept verbatim (not parsed to a [`crate::Bank`]) so the
/// pending file reproduces the input line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub country: String,
    pub bank: String,
    pub application: String,
}

impl PendingEntry {
    pub fn new(
        country: impl Into<String>,
        bank: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            bank: bank.into(),
            application: application.into(),
        }
    }
}
