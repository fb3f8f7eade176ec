//! Compliance aggregation and workbook output.
//!
//! Groups evaluated applications by (domain, subdomain, bank, region) and
//! computes percentage compliance per reported criterion. Cumple counts
//! 1.0, Parcialmente 0.5, No Cumple 0.0; N/A and empty verdicts stay out
//! of the denominator, so a group with no data yields no percentage at
//! all rather than a misleading zero.

use std::collections::BTreeMap;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use appfit_model::{Bank, Criterion};
use appfit_recon::EvaluatedApp;

use crate::error::{ReportError, Result};
use crate::ordering::{display_subdomain, subdomain_sort_key};
use crate::region::{Region, classify};

/// Criteria aggregated in the summary sheets, in column order.
pub const REPORT_CRITERIA: [Criterion; 6] = [
    Criterion::Obsolescencia,
    Criterion::Escalabilidad,
    Criterion::Acople,
    Criterion::Estabilidad,
    Criterion::Extensibilidad,
    Criterion::Seguridad,
];

/// One summary line of the compliance report.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRow {
    pub domain: String,
    pub subdomain: String,
    pub bank: Bank,
    pub region: Region,
    pub total_applications: usize,
    /// Percentages in [`REPORT_CRITERIA`] order; `None` when no
    /// application in the group had a scorable verdict.
    pub percentages: [Option<f64>; 6],
}

/// Aggregate evaluated applications into sorted compliance rows.
///
/// Split subdomains (`_1`, `_2` files) collapse into one row. Rows are
/// ordered by region, domain, the editorial subdomain order and bank.
pub fn summarize(evaluated: &[EvaluatedApp]) -> Vec<ComplianceRow> {
    let mut groups: BTreeMap<(String, String, Bank, Region), Vec<&EvaluatedApp>> = BTreeMap::new();
    for app in evaluated {
        let key = (
            app.entry.domain.clone(),
            display_subdomain(&app.entry.subdomain).to_string(),
            app.bank,
            classify(&app.entry.country),
        );
        groups.entry(key).or_default().push(app);
    }

    let mut rows: Vec<ComplianceRow> = groups
        .into_iter()
        .map(|((domain, subdomain, bank, region), apps)| {
            let mut percentages = [None; 6];
            for (index, criterion) in REPORT_CRITERIA.iter().enumerate() {
                let scores: Vec<f64> = apps
                    .iter()
                    .filter_map(|app| app.evaluation.get(*criterion).score())
                    .collect();
                if !scores.is_empty() {
                    percentages[index] =
                        Some(scores.iter().sum::<f64>() / scores.len() as f64 * 100.0);
                }
            }
            ComplianceRow {
                domain,
                subdomain,
                bank,
                region,
                total_applications: apps.len(),
                percentages,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let key_a = (
            a.region.as_str(),
            a.domain.as_str(),
            subdomain_sort_key(&a.domain, &a.subdomain),
            a.subdomain.as_str(),
            a.bank.label(),
        );
        let key_b = (
            b.region.as_str(),
            b.domain.as_str(),
            subdomain_sort_key(&b.domain, &b.subdomain),
            b.subdomain.as_str(),
            b.bank.label(),
        );
        key_a.cmp(&key_b)
    });
    rows
}

/// Write the eight-sheet compliance workbook: a summary and a raw-data
/// sheet per (bank, reported region). Otro-region rows are not reported.
pub fn write_workbook(
    rows: &[ComplianceRow],
    raw: &[EvaluatedApp],
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for bank in Bank::ALL {
        for region in Region::REPORTED {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(format!(
                    "Resumen_{}_{}",
                    bank.sheet_code(),
                    region.sheet_code()
                ))
                .map_err(|source| xlsx_error(path, source))?;

            let mut headers = vec![
                "Dominio".to_string(),
                "Subdominio".to_string(),
                "Total Aplicaciones".to_string(),
            ];
            headers.extend(
                REPORT_CRITERIA
                    .iter()
                    .map(|criterion| format!("{} (%)", criterion.header())),
            );
            for (column, header) in headers.iter().enumerate() {
                sheet
                    .write_string_with_format(0, column as u16, header, &bold)
                    .map_err(|source| xlsx_error(path, source))?;
            }

            let mut row_index = 1u32;
            for row in rows
                .iter()
                .filter(|row| row.bank == bank && row.region == region)
            {
                sheet
                    .write_string(row_index, 0, &row.domain)
                    .map_err(|source| xlsx_error(path, source))?;
                sheet
                    .write_string(row_index, 1, &row.subdomain)
                    .map_err(|source| xlsx_error(path, source))?;
                sheet
                    .write_number(row_index, 2, row.total_applications as f64)
                    .map_err(|source| xlsx_error(path, source))?;
                for (offset, percentage) in row.percentages.iter().enumerate() {
                    if let Some(value) = percentage {
                        sheet
                            .write_number(row_index, (3 + offset) as u16, *value)
                            .map_err(|source| xlsx_error(path, source))?;
                    }
                }
                row_index += 1;
            }
        }
    }

    for bank in Bank::ALL {
        for region in Region::REPORTED {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(format!(
                    "Datos_Raw_{}_{}",
                    bank.sheet_code(),
                    region.sheet_code()
                ))
                .map_err(|source| xlsx_error(path, source))?;

            let mut headers = vec![
                "Dominio".to_string(),
                "Subdominio".to_string(),
                "Banco".to_string(),
                "Pais".to_string(),
                "Region".to_string(),
                "Aplicacion".to_string(),
            ];
            headers.extend(Criterion::ALL.iter().map(|c| c.header().to_string()));
            for (column, header) in headers.iter().enumerate() {
                sheet
                    .write_string_with_format(0, column as u16, header, &bold)
                    .map_err(|source| xlsx_error(path, source))?;
            }

            let mut row_index = 1u32;
            for app in raw
                .iter()
                .filter(|app| app.bank == bank && classify(&app.entry.country) == region)
            {
                let cells = [
                    app.entry.domain.as_str(),
                    display_subdomain(&app.entry.subdomain),
                    app.bank.label(),
                    app.entry.country.as_str(),
                    region.as_str(),
                    app.entry.application.as_str(),
                ];
                for (column, cell) in cells.iter().enumerate() {
                    sheet
                        .write_string(row_index, column as u16, *cell)
                        .map_err(|source| xlsx_error(path, source))?;
                }
                for (offset, (_, verdict)) in app.evaluation.iter().enumerate() {
                    sheet
                        .write_string(row_index, (6 + offset) as u16, verdict.as_str())
                        .map_err(|source| xlsx_error(path, source))?;
                }
                row_index += 1;
            }
        }
    }

    workbook
        .save(path)
        .map_err(|source| xlsx_error(path, source))?;
    info!(path = %path.display(), rows = rows.len(), "compliance workbook written");
    Ok(())
}

fn xlsx_error(path: &Path, source: XlsxError) -> ReportError {
    ReportError::Xlsx {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appfit_ingest::RosterEntry;
    use appfit_model::{Evaluation, Verdict};

    fn app(
        domain: &str,
        subdomain: &str,
        country: &str,
        bank: Bank,
        verdicts: &[(Criterion, Verdict)],
    ) -> EvaluatedApp {
        let mut evaluation = Evaluation::new();
        for (criterion, verdict) in verdicts {
            evaluation.set(*criterion, *verdict);
        }
        EvaluatedApp {
            entry: RosterEntry {
                domain: domain.into(),
                subdomain: subdomain.into(),
                country: country.into(),
                bank_tag: bank.label().into(),
                application: "App".into(),
            },
            bank,
            matched_name: "App".into(),
            record: appfit_model::Record::new(),
            evaluation,
        }
    }

    #[test]
    fn percentages_average_scorable_verdicts_only() {
        let evaluated = vec![
            app(
                "canales",
                "canales_web_retail",
                "Colombia (CO)",
                Bank::Buyer,
                &[
                    (Criterion::Obsolescencia, Verdict::Cumple),
                    (Criterion::Seguridad, Verdict::NoAplica),
                ],
            ),
            app(
                "canales",
                "canales_web_retail",
                "Colombia (CO)",
                Bank::Buyer,
                &[
                    (Criterion::Obsolescencia, Verdict::NoCumple),
                    (Criterion::Seguridad, Verdict::Parcialmente),
                ],
            ),
        ];

        let rows = summarize(&evaluated);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.total_applications, 2);
        // Obsolescencia: (1.0 + 0.0) / 2 apps.
        assert_eq!(row.percentages[0], Some(50.0));
        // Seguridad: the N/A verdict leaves one scorable app.
        assert_eq!(row.percentages[5], Some(50.0));
        // Escalabilidad: no data anywhere.
        assert_eq!(row.percentages[1], None);
        // Acople is always Parcialmente... except nothing was evaluated
        // here, so the default empty verdict contributes nothing.
        assert_eq!(row.percentages[2], None);
    }

    #[test]
    fn split_subdomains_collapse_into_one_row() {
        let evaluated = vec![
            app(
                "canales",
                "canales_web_retail_1",
                "Colombia (CO)",
                Bank::Buyer,
                &[(Criterion::Obsolescencia, Verdict::Cumple)],
            ),
            app(
                "canales",
                "canales_web_retail_2",
                "Colombia (CO)",
                Bank::Buyer,
                &[(Criterion::Obsolescencia, Verdict::Cumple)],
            ),
        ];

        let rows = summarize(&evaluated);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subdomain, "canales_web_retail");
        assert_eq!(rows[0].total_applications, 2);
    }

    #[test]
    fn rows_sort_by_region_domain_order_and_bank() {
        let evaluated = vec![
            app("canales", "canales_atm", "Colombia (CO)", Bank::Buyer, &[]),
            app("canales", "canales_web_retail", "Colombia (CO)", Bank::Buyer, &[]),
            app("canales", "canales_web_retail", "Panamá (PA)", Bank::Bought, &[]),
        ];

        let rows = summarize(&evaluated);
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.region.as_str(), row.subdomain.as_str()))
            .collect();
        // CAM sorts before Colombia; within Colombia the editorial order
        // puts web_retail before atm.
        assert_eq!(
            order,
            vec![
                ("CAM", "canales_web_retail"),
                ("Colombia", "canales_web_retail"),
                ("Colombia", "canales_atm"),
            ]
        );
    }

    #[test]
    fn workbook_writes_eight_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cumplimiento.xlsx");
        let evaluated = vec![app(
            "canales",
            "canales_web_retail",
            "Colombia (CO)",
            Bank::Buyer,
            &[(Criterion::Obsolescencia, Verdict::Cumple)],
        )];
        let rows = summarize(&evaluated);

        write_workbook(&rows, &evaluated, &path).unwrap();
        assert!(path.exists());
    }
}
