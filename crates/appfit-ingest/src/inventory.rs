//! Inventory loading from CSV exports and Excel workbooks.
//!
//! Column headers are normalized with the same transformation applied to
//! application names, so the criteria map can reference them by a stable
//! spelling regardless of accents or stray punctuation in the source
//! sheet. Every record additionally carries a `banco` column naming its
//! source bank.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use appfit_model::{Bank, Inventory, Record};
use appfit_normalize::normalize;

use crate::error::{IngestError, Result};

/// Column appended to every record identifying the source bank.
pub const BANK_COLUMN: &str = "banco";

/// Preferred worksheet name in the master workbooks; the first sheet is
/// used when absent.
const APPLICATIONS_SHEET: &str = "Applications";

/// Read one bank's inventory, dispatching on the file extension.
///
/// Fails when the application-name column (`name_column`, already in its
/// normalized spelling) is absent after header normalization — nothing
/// downstream can work without it.
pub fn read_inventory(path: &Path, bank: Bank, name_column: &str) -> Result<Inventory> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let inventory = match extension.as_str() {
        "csv" => read_inventory_csv(path, bank)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_inventory_workbook(path, bank)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    if !inventory.columns.iter().any(|column| column == name_column) {
        return Err(IngestError::MissingColumn {
            column: name_column.to_string(),
            path: path.to_path_buf(),
        });
    }

    info!(
        bank = %bank,
        rows = inventory.len(),
        path = %path.display(),
        "inventory loaded"
    );
    Ok(inventory)
}

fn read_inventory_csv(path: &Path, bank: Bank) -> Result<Inventory> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize)
        .collect();

    let mut inventory = new_inventory(bank, headers.clone());
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        inventory.records.push(build_record(&headers, cells, bank));
    }

    Ok(inventory)
}

fn read_inventory_workbook(path: &Path, bank: Bank) -> Result<Inventory> {
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet = sheet_names
        .iter()
        .find(|name| name.as_str() == APPLICATIONS_SHEET)
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;
    debug!(sheet = %sheet, path = %path.display(), "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| normalize(&cell_to_string(cell)))
            .collect(),
        None => Vec::new(),
    };

    let mut inventory = new_inventory(bank, headers.clone());
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .enumerate()
            .map(|(idx, _)| row.get(idx).map(cell_to_string).unwrap_or_default())
            .collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        inventory.records.push(build_record(&headers, cells, bank));
    }

    Ok(inventory)
}

fn new_inventory(bank: Bank, mut columns: Vec<String>) -> Inventory {
    columns.push(BANK_COLUMN.to_string());
    Inventory::new(bank, columns)
}

fn build_record(headers: &[String], cells: Vec<String>, bank: Bank) -> Record {
    let mut record = Record::new();
    for (header, cell) in headers.iter().zip(cells) {
        record.push(header.clone(), cell);
    }
    record.push(BANK_COLUMN, bank.label());
    record
}

/// Render a workbook cell as the string the evaluator will see. Whole
/// floats print without a fractional part so ratings read as "4", not
/// "4.0".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
