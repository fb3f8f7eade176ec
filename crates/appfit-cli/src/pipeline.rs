//! End-to-end pipeline runs behind the CLI commands.
//!
//! Each run function is a plain library entry point so the integration
//! tests can drive the whole pipeline without spawning the binary.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use tracing::{info, info_span, warn};

use appfit_evaluate::RuleSet;
use appfit_ingest::{RosterEntry, load_criteria_map, read_inventory, read_roster};
use appfit_match::Matcher;
use appfit_model::{Bank, CriteriaMap, PendingEntry};
use appfit_recon::{NoopMarker, ReconOutcome, Reconciler, Source};
use appfit_report::{SlideRow, SuggestionSection};
use appfit_store::Store;

/// Workbook filename inside the output directory.
const WORKBOOK_FILENAME: &str = "Reporte_Cumplimiento_Target.xlsx";

/// Where the report run reads its inventories from.
pub enum InventorySource {
    /// Direct reads of the master files; column names stay in their
    /// normalized spreadsheet spelling.
    Files { buyer: PathBuf, bought: PathBuf },
    /// A staged store; column names are sanitized and matched records
    /// get the in-scope mark.
    Store { path: PathBuf },
}

pub struct ReportOptions {
    pub inputs: PathBuf,
    pub source: InventorySource,
    pub output_dir: PathBuf,
    pub rules: RuleSet,
    pub threshold: f64,
    pub criteria_map: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DomainSummary {
    pub domain: String,
    pub entries: usize,
    pub evaluated: usize,
    pub pending: usize,
}

#[derive(Debug)]
pub struct ReportResult {
    pub output_dir: PathBuf,
    pub domains: Vec<DomainSummary>,
    pub evaluated: usize,
    pub pending: Vec<PendingEntry>,
    pub unrecognized_tags: usize,
    pub pending_file: PathBuf,
    pub workbook: PathBuf,
    pub slide_files: usize,
}

pub fn run_report(options: &ReportOptions) -> Result<ReportResult> {
    ensure!(
        (0.0..=100.0).contains(&options.threshold),
        "threshold must be between 0 and 100, got {}",
        options.threshold
    );

    let map = resolve_criteria_map(options)?;

    // Stage 1: inventories.
    let load_span = info_span!("load_inventories");
    let (buyer_inventory, bought_inventory, mut store) = load_span.in_scope(|| {
        anyhow::Ok(match &options.source {
            InventorySource::Files { buyer, bought } => (
                read_inventory(buyer, Bank::Buyer, &map.aplicacion)
                    .context("read buyer inventory")?,
                read_inventory(bought, Bank::Bought, &map.aplicacion)
                    .context("read bought inventory")?,
                None,
            ),
            InventorySource::Store { path } => {
                let store = Store::open(path).context("open store")?;
                let buyer = store
                    .read_inventory(Bank::Buyer)
                    .context("read buyer inventory from store")?;
                let bought = store
                    .read_inventory(Bank::Bought)
                    .context("read bought inventory from store")?;
                (buyer, bought, Some(store))
            }
        })
    })?;

    // Stage 2: lookups and roster.
    let buyer = Source::new(&buyer_inventory, &map.aplicacion);
    let bought = Source::new(&bought_inventory, &map.aplicacion);
    info!(
        buyer_names = buyer.lookup.len(),
        bought_names = bought.lookup.len(),
        "lookups built"
    );
    let roster = read_roster(&options.inputs).context("read input lists")?;
    info!(entries = roster.len(), "roster read");

    // Stage 3: reconcile and evaluate.
    let reconciler = Reconciler::new(
        &map,
        Matcher::with_threshold(options.threshold),
        options.rules,
    );
    let recon_span = info_span!("reconcile");
    let outcome = recon_span.in_scope(|| {
        let mut noop = NoopMarker;
        match store.as_mut() {
            Some(store) => reconciler.run(&roster, &buyer, &bought, store),
            None => reconciler.run(&roster, &buyer, &bought, &mut noop),
        }
    });

    // Stage 4: outputs.
    let (slide_groups, domains) = assemble(&roster, &outcome, &map);
    let written = appfit_report::write_slides(&slide_groups, &options.output_dir.join("slides"))
        .context("write slide rows")?;
    let pending_file = options
        .output_dir
        .join("pendientes")
        .join("pendientes.txt");
    appfit_report::write_pending(&outcome.pending, &pending_file)
        .context("write pending list")?;
    let workbook = options.output_dir.join(WORKBOOK_FILENAME);
    let rows = appfit_report::summarize(&outcome.evaluated);
    appfit_report::write_workbook(&rows, &outcome.evaluated, &workbook)
        .context("write compliance workbook")?;

    Ok(ReportResult {
        output_dir: options.output_dir.clone(),
        domains,
        evaluated: outcome.evaluated.len(),
        pending: outcome.pending,
        unrecognized_tags: outcome.unrecognized_tags,
        pending_file,
        workbook,
        slide_files: written.len(),
    })
}

fn resolve_criteria_map(options: &ReportOptions) -> Result<CriteriaMap> {
    match &options.criteria_map {
        Some(path) => load_criteria_map(path).context("load criteria map"),
        None => Ok(match &options.source {
            InventorySource::Files { .. } => CriteriaMap::spreadsheet(),
            InventorySource::Store { .. } => CriteriaMap::database(),
        }),
    }
}

/// Walk the roster once, pairing each entry with its reconciliation
/// result, to build the slide groups and the per-domain counts.
///
/// Evaluated and pending entries come back from the driver in roster
/// order, so both pair up with a single forward pass. Entries that
/// matched but had no inventory row still render as name-only rows;
/// unrecognized tags render nothing.
fn assemble(
    roster: &[RosterEntry],
    outcome: &ReconOutcome,
    map: &CriteriaMap,
) -> (
    BTreeMap<(String, String), Vec<SlideRow>>,
    Vec<DomainSummary>,
) {
    let mut groups: BTreeMap<(String, String), Vec<SlideRow>> = BTreeMap::new();
    let mut counts: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();

    let mut evaluated = outcome.evaluated.iter().peekable();
    let mut pending = outcome.pending.iter().peekable();

    for entry in roster {
        let tally = counts.entry(entry.domain.clone()).or_default();
        tally.0 += 1;

        let row = if evaluated.peek().is_some_and(|app| app.entry == *entry) {
            let app = evaluated.next().expect("peeked evaluated entry");
            tally.1 += 1;
            appfit_report::slide_row(app, map)
        } else if pending.peek().is_some_and(|p| {
            p.country == entry.country
                && p.bank == entry.bank_tag
                && p.application == entry.application
        }) {
            pending.next();
            tally.2 += 1;
            appfit_report::placeholder_row(&entry.application)
        } else if Bank::from_tag(&entry.bank_tag).is_some() {
            // Matched but no inventory row: name-only, like a pending row.
            appfit_report::placeholder_row(&entry.application)
        } else {
            continue;
        };

        groups
            .entry((entry.domain.clone(), entry.subdomain.clone()))
            .or_default()
            .push(row);
    }

    let domains = counts
        .into_iter()
        .map(|(domain, (entries, evaluated, pending))| DomainSummary {
            domain,
            entries,
            evaluated,
            pending,
        })
        .collect();
    (groups, domains)
}

pub struct LoadOptions {
    pub buyer: PathBuf,
    pub bought: PathBuf,
    pub store: PathBuf,
}

#[derive(Debug)]
pub struct LoadResult {
    pub store: PathBuf,
    pub buyer_rows: usize,
    pub bought_rows: usize,
}

pub fn run_load(options: &LoadOptions) -> Result<LoadResult> {
    let map = CriteriaMap::spreadsheet();
    let buyer = read_inventory(&options.buyer, Bank::Buyer, &map.aplicacion)
        .context("read buyer inventory")?;
    let bought = read_inventory(&options.bought, Bank::Bought, &map.aplicacion)
        .context("read bought inventory")?;

    let mut store = Store::open(&options.store).context("open store")?;
    let buyer_rows = store
        .load_inventory(&buyer)
        .context("stage buyer inventory")?;
    let bought_rows = store
        .load_inventory(&bought)
        .context("stage bought inventory")?;

    Ok(LoadResult {
        store: options.store.clone(),
        buyer_rows,
        bought_rows,
    })
}

pub struct SuggestOptions {
    pub store: PathBuf,
    pub pending_file: PathBuf,
    pub output: PathBuf,
    pub limit: usize,
}

#[derive(Debug)]
pub struct SuggestResult {
    pub output: PathBuf,
    pub pending_buyer: usize,
    pub pending_bought: usize,
}

pub fn run_suggest(options: &SuggestOptions) -> Result<SuggestResult> {
    let entries = appfit_report::parse_pending(&options.pending_file)
        .context("read pending list")?;

    // Distinct names per bank, sorted for a stable report.
    let mut by_bank: BTreeMap<Bank, BTreeSet<String>> = BTreeMap::new();
    for entry in &entries {
        match Bank::from_tag(&entry.bank) {
            Some(bank) => {
                by_bank
                    .entry(bank)
                    .or_default()
                    .insert(entry.application.clone());
            }
            None => warn!(tag = %entry.bank, "unrecognized bank tag in pending list"),
        }
    }

    let store = Store::open(&options.store).context("open store")?;
    let mut sections = Vec::new();
    for bank in Bank::ALL {
        let names = by_bank.remove(&bank).unwrap_or_default();
        let mut findings = Vec::new();
        for name in names {
            let matches = store
                .suggest(bank, &name, options.limit)
                .with_context(|| format!("search suggestions for {name:?}"))?;
            findings.push((name, matches));
        }
        sections.push(SuggestionSection {
            table: Store::table_name(bank).to_string(),
            findings,
        });
    }

    appfit_report::write_suggestions(&sections, &options.output)
        .context("write suggestion report")?;

    let count_of = |bank: Bank, sections: &[SuggestionSection]| {
        sections
            .iter()
            .find(|section| section.table == Store::table_name(bank))
            .map_or(0, |section| section.findings.len())
    };
    Ok(SuggestResult {
        output: options.output.clone(),
        pending_buyer: count_of(Bank::Buyer, &sections),
        pending_bought: count_of(Bank::Bought, &sections),
    })
}
