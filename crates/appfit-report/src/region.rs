//! Region classification for the compliance split.
//!
//! Countries appear as "Name (CC)" in input lists; classification keys on
//! the ISO code in parentheses so accent variants of the same country
//! land in the same region.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting region: Colombia is broken out, the Central American
/// operations are aggregated as CAM, anything else falls into Otro and
/// is excluded from the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Colombia,
    Cam,
    Otro,
}

/// ISO codes of the Central American countries in scope.
const CAM_CODES: [&str; 6] = ["PA", "CR", "GT", "HN", "SV", "NI"];

impl Region {
    /// Regions that get workbook sheets.
    pub const REPORTED: [Region; 2] = [Region::Colombia, Region::Cam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Colombia => "Colombia",
            Region::Cam => "CAM",
            Region::Otro => "Otro",
        }
    }

    /// Short code used in workbook sheet names.
    pub fn sheet_code(&self) -> &'static str {
        match self {
            Region::Colombia => "CO",
            Region::Cam => "CAM",
            Region::Otro => "OTRO",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a country string from an input list.
pub fn classify(country: &str) -> Region {
    match country_code(country).as_deref() {
        Some("CO") => Region::Colombia,
        Some(code) if CAM_CODES.contains(&code) => Region::Cam,
        _ => Region::Otro,
    }
}

/// The code inside the last parenthesized group, uppercased.
fn country_code(country: &str) -> Option<String> {
    let open = country.rfind('(')?;
    let close = country[open..].find(')')? + open;
    let code = country[open + 1..close].trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colombia_is_broken_out() {
        assert_eq!(classify("Colombia (CO)"), Region::Colombia);
        assert_eq!(classify("colombia (co)"), Region::Colombia);
    }

    #[test]
    fn central_america_aggregates_to_cam() {
        for country in [
            "Panamá (PA)",
            "Costa Rica (CR)",
            "Guatemala (GT)",
            "Honduras (HN)",
            "El Salvador (SV)",
            "Nicaragua (NI)",
        ] {
            assert_eq!(classify(country), Region::Cam, "{country}");
        }
    }

    #[test]
    fn unknown_countries_fall_into_otro() {
        assert_eq!(classify("España (ES)"), Region::Otro);
        assert_eq!(classify("Colombia"), Region::Otro);
        assert_eq!(classify(""), Region::Otro);
    }
}
