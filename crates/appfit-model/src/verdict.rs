//! Tri-state (plus "partial" and "no data") compliance verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of evaluating one criterion for one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Meets the criterion.
    Cumple,
    /// Does not meet the criterion.
    NoCumple,
    /// Partially meets the criterion.
    Parcialmente,
    /// Explicitly not applicable (distinct from missing data).
    NoAplica,
    /// No data, or the criterion was not evaluated. Renders as an empty cell.
    #[default]
    SinDato,
}

impl Verdict {
    /// Verdict text as written to reports. `SinDato` is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Cumple => "Cumple",
            Verdict::NoCumple => "No Cumple",
            Verdict::Parcialmente => "Parcialmente",
            Verdict::NoAplica => "N/A",
            Verdict::SinDato => "",
        }
    }

    /// Compliance score used by the percentage aggregation.
    ///
    /// `None` means the verdict does not count toward a group's denominator.
    pub fn score(&self) -> Option<f64> {
        match self {
            Verdict::Cumple => Some(1.0),
            Verdict::Parcialmente => Some(0.5),
            Verdict::NoCumple => Some(0.0),
            Verdict::NoAplica | Verdict::SinDato => None,
        }
    }

    /// Icon key for the slide renderer. Only the three decided verdicts
    /// draw an icon.
    pub fn icon_key(&self) -> Option<&'static str> {
        match self {
            Verdict::Cumple => Some("si"),
            Verdict::NoCumple => Some("no"),
            Verdict::Parcialmente => Some("parcial"),
            Verdict::NoAplica | Verdict::SinDato => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Verdict::SinDato)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_exclude_na_and_missing() {
        assert_eq!(Verdict::Cumple.score(), Some(1.0));
        assert_eq!(Verdict::Parcialmente.score(), Some(0.5));
        assert_eq!(Verdict::NoCumple.score(), Some(0.0));
        assert_eq!(Verdict::NoAplica.score(), None);
        assert_eq!(Verdict::SinDato.score(), None);
    }

    #[test]
    fn missing_renders_empty() {
        assert_eq!(Verdict::default(), Verdict::SinDato);
        assert_eq!(Verdict::SinDato.as_str(), "");
        assert_eq!(Verdict::SinDato.icon_key(), None);
    }
}
