//! Verdict set produced for one application.

use serde::{Deserialize, Serialize};

use crate::{Criterion, Verdict};

/// The nine verdicts for one evaluated application, indexed by criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    verdicts: [Verdict; 9],
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, criterion: Criterion) -> Verdict {
        self.verdicts[criterion.index()]
    }

    pub fn set(&mut self, criterion: Criterion, verdict: Verdict) {
        self.verdicts[criterion.index()] = verdict;
    }

    /// Verdicts in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, Verdict)> + '_ {
        Criterion::ALL.iter().map(|c| (*c, self.get(*c)))
    }
}
