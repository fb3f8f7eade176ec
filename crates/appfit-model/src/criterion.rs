//! The fixed set of architecture-fitness criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the nine criteria evaluated per application.
///
/// The variant order is the column order of the rendered assessment row
/// and is relied on by [`crate::Evaluation`] for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Obsolescencia,
    Escalabilidad,
    Acople,
    Estabilidad,
    Extensibilidad,
    Seguridad,
    Cobertura,
    Ux,
    Agilidad,
}

impl Criterion {
    /// All criteria in display order.
    pub const ALL: [Criterion; 9] = [
        Criterion::Obsolescencia,
        Criterion::Escalabilidad,
        Criterion::Acople,
        Criterion::Estabilidad,
        Criterion::Extensibilidad,
        Criterion::Seguridad,
        Criterion::Cobertura,
        Criterion::Ux,
        Criterion::Agilidad,
    ];

    /// Lowercase identifier as used in configuration and raw data sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Obsolescencia => "obsolescencia",
            Criterion::Escalabilidad => "escalabilidad",
            Criterion::Acople => "acople",
            Criterion::Estabilidad => "estabilidad",
            Criterion::Extensibilidad => "extensibilidad",
            Criterion::Seguridad => "seguridad",
            Criterion::Cobertura => "cobertura",
            Criterion::Ux => "ux",
            Criterion::Agilidad => "agilidad",
        }
    }

    /// Human-readable column header.
    pub fn header(&self) -> &'static str {
        match self {
            Criterion::Obsolescencia => "Obsolescencia",
            Criterion::Escalabilidad => "Escalabilidad",
            Criterion::Acople => "Acople",
            Criterion::Estabilidad => "Estabilidad",
            Criterion::Extensibilidad => "Extensibilidad",
            Criterion::Seguridad => "Seguridad",
            Criterion::Cobertura => "Cobertura",
            Criterion::Ux => "UX",
            Criterion::Agilidad => "Agilidad",
        }
    }

    /// Position in [`Criterion::ALL`].
    pub fn index(self) -> usize {
        Criterion::ALL
            .iter()
            .position(|c| *c == self)
            .expect("criterion present in ALL")
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Criterion::ALL
            .iter()
            .find(|c| c.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown criterion: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_criteria_round_trip_through_from_str() {
        for criterion in Criterion::ALL {
            assert_eq!(criterion.as_str().parse::<Criterion>().unwrap(), criterion);
        }
        assert!("cohesion".parse::<Criterion>().is_err());
    }

    #[test]
    fn index_matches_position_in_all() {
        for (idx, criterion) in Criterion::ALL.iter().enumerate() {
            assert_eq!(criterion.index(), idx);
        }
    }
}
