//! Reconciliation driver.
//!
//! Walks the roster in order, resolves each entry to its bank's lookup
//! set, matches, retrieves the record and evaluates it. The failure unit
//! is one input line: unrecognized tags, unmatched names and side-effect
//! write failures are diagnosed and the batch continues.

use tracing::{debug, info, warn};

use appfit_evaluate::{RuleSet, evaluate};
use appfit_ingest::RosterEntry;
use appfit_match::{Lookup, Matcher};
use appfit_model::{Bank, CriteriaMap, Evaluation, Inventory, PendingEntry, Record};

/// Side effect applied to every successfully matched application.
///
/// Store-backed runs flag the source record as included in the target
/// architecture; the reporting layer later filters on that flag. Failures
/// here affect provenance only, never verdicts, so the driver logs and
/// swallows them.
pub trait ScopeMarker {
    fn mark_in_scope(&mut self, bank: Bank, matched_name: &str) -> anyhow::Result<()>;
}

/// Marker for file-backed runs: nothing to flag.
#[derive(Debug, Default)]
pub struct NoopMarker;

impl ScopeMarker for NoopMarker {
    fn mark_in_scope(&mut self, _bank: Bank, _matched_name: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// One bank's inventory plus the lookup built from its distinct names.
pub struct Source<'a> {
    pub inventory: &'a Inventory,
    pub lookup: Lookup,
}

impl<'a> Source<'a> {
    pub fn new(inventory: &'a Inventory, name_column: &str) -> Self {
        Self {
            inventory,
            lookup: Lookup::from_names(inventory.names(name_column)),
        }
    }
}

/// A roster entry that matched, with its record and verdicts.
#[derive(Debug, Clone)]
pub struct EvaluatedApp {
    pub entry: RosterEntry,
    pub bank: Bank,
    pub matched_name: String,
    pub record: Record,
    pub evaluation: Evaluation,
}

/// Everything one reconciliation pass produced.
#[derive(Debug, Default)]
pub struct ReconOutcome {
    pub evaluated: Vec<EvaluatedApp>,
    pub pending: Vec<PendingEntry>,
    /// Lines whose source tag matched neither bank.
    pub unrecognized_tags: usize,
    /// Matches whose name had no inventory row. Lookup construction makes
    /// this impossible in practice; counted rather than trusted.
    pub missing_records: usize,
}

pub struct Reconciler<'a> {
    map: &'a CriteriaMap,
    matcher: Matcher,
    rules: RuleSet,
}

impl<'a> Reconciler<'a> {
    pub fn new(map: &'a CriteriaMap, matcher: Matcher, rules: RuleSet) -> Self {
        Self {
            map,
            matcher,
            rules,
        }
    }

    /// Reconcile the whole roster against both sources.
    pub fn run(
        &self,
        entries: &[RosterEntry],
        buyer: &Source<'_>,
        bought: &Source<'_>,
        marker: &mut dyn ScopeMarker,
    ) -> ReconOutcome {
        let mut outcome = ReconOutcome::default();

        for entry in entries {
            let Some(bank) = Bank::from_tag(&entry.bank_tag) else {
                warn!(
                    tag = %entry.bank_tag,
                    application = %entry.application,
                    "unrecognized source tag, skipping line"
                );
                outcome.unrecognized_tags += 1;
                continue;
            };
            let source = match bank {
                Bank::Buyer => buyer,
                Bank::Bought => bought,
            };

            match self.matcher.find_best_match(&entry.application, &source.lookup) {
                Some(matched) => {
                    let Some(record) =
                        source.inventory.find_by_name(&self.map.aplicacion, matched)
                    else {
                        warn!(
                            application = %entry.application,
                            matched,
                            "matched name has no inventory row, skipping line"
                        );
                        outcome.missing_records += 1;
                        continue;
                    };

                    if let Err(error) = marker.mark_in_scope(bank, matched) {
                        warn!(application = %matched, %error, "in-scope mark failed");
                    }

                    let evaluation = evaluate(record, bank, self.map, self.rules);
                    debug!(application = %entry.application, matched, "application evaluated");
                    outcome.evaluated.push(EvaluatedApp {
                        entry: entry.clone(),
                        bank,
                        matched_name: matched.to_string(),
                        record: record.clone(),
                        evaluation,
                    });
                }
                None => {
                    debug!(application = %entry.application, "no match above threshold");
                    outcome.pending.push(PendingEntry::new(
                        &entry.country,
                        &entry.bank_tag,
                        &entry.application,
                    ));
                }
            }
        }

        info!(
            evaluated = outcome.evaluated.len(),
            pending = outcome.pending.len(),
            unrecognized = outcome.unrecognized_tags,
            "reconciliation finished"
        );
        outcome
    }
}
