//! The two organizations whose application inventories are compared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies which side of the acquisition an inventory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bank {
    /// The acquiring organization ("BuyerBank").
    Buyer,
    /// The organization being acquired ("BoughtBank").
    Bought,
}

impl Bank {
    /// Both banks, in reporting order.
    pub const ALL: [Bank; 2] = [Bank::Buyer, Bank::Bought];

    /// Canonical label as it appears in input files and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Bank::Buyer => "BuyerBank",
            Bank::Bought => "BoughtBank",
        }
    }

    /// Classify a free-text source tag from an input line.
    ///
    /// Matching is case-insensitive and by substring, so tags like
    /// `"BuyerBank (CO)"` resolve. Returns `None` for unrecognized tags;
    /// the caller decides whether that is a skip or an error.
    pub fn from_tag(tag: &str) -> Option<Bank> {
        let upper = tag.to_uppercase();
        if upper.contains("BUYERBANK") {
            Some(Bank::Buyer)
        } else if upper.contains("BOUGHTBANK") {
            Some(Bank::Bought)
        } else {
            None
        }
    }

    /// Short code used in workbook sheet names.
    pub fn sheet_code(&self) -> &'static str {
        match self {
            Bank::Buyer => "Buyer",
            Bank::Bought => "Bought",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bank::from_tag(s).ok_or_else(|| format!("Unknown bank tag: {s}"))
    }
}
