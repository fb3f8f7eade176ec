//! Selectable rule-set strategies.
//!
//! The assessment's history produced two divergent interpretations of the
//! obsolescencia / extensibilidad / seguridad columns. Neither is silently
//! preferred: both are first-class strategies and the integrator declares
//! which one is authoritative for a run (`--rules` on the CLI).

use std::fmt;
use std::str::FromStr;

/// How the evaluator interprets the underlying inventory columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleSet {
    /// Interpret the raw inventory wording, keyed by source bank:
    /// obsolescencia reads "vigente" for the buyer and
    /// "obsoleto"/"no obsoleto" for the bought bank; extensibilidad
    /// classifies the Regional/Global/Local footprint; seguridad is a
    /// 1–5 numeric rating.
    #[default]
    BankKeyed,
    /// Interpret pre-scored cell text ("Cumple"/"Parcialmente"/"No
    /// Cumple") for extensibilidad and seguridad, with a bank-independent
    /// obsolescencia rule. Used when the sheets carry the analysts'
    /// already-computed results.
    Prescored,
}

impl RuleSet {
    pub const ALL: [RuleSet; 2] = [RuleSet::BankKeyed, RuleSet::Prescored];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSet::BankKeyed => "bank-keyed",
            RuleSet::Prescored => "prescored",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bank-keyed" => Ok(RuleSet::BankKeyed),
            "prescored" => Ok(RuleSet::Prescored),
            _ => Err(format!("Unknown rule set: {s}")),
        }
    }
}
