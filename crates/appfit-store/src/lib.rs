//! SQLite staging store.
//!
//! `appfit load` stages both inventories here so later runs (and the
//! suggestion search) work from one file instead of re-reading the master
//! workbooks. Tables are replaced wholesale on load; the only in-place
//! mutation is the per-application in-scope flag, written as its own
//! auto-committed statement so a crash mid-batch keeps the marks made so
//! far.

pub mod sanitize;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use thiserror::Error;
use tracing::info;

use appfit_model::{Bank, Inventory, Record};

/// Staging table per bank.
pub const TABLE_BUYER: &str = "aplicaciones_buyer_bank";
pub const TABLE_BOUGHT: &str = "aplicaciones_bought_bank";

/// Sanitized name column, present in every staged table.
pub const NAME_COLUMN: &str = "aplicacion_sistema";

/// Flag column marking records included in the target architecture.
pub const SCOPE_COLUMN: &str = "mostrar_en_arquitectura_target";

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("open store {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store query failed: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("inventory has no columns to stage")]
    EmptyInventory,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { conn })
    }

    pub fn table_name(bank: Bank) -> &'static str {
        match bank {
            Bank::Buyer => TABLE_BUYER,
            Bank::Bought => TABLE_BOUGHT,
        }
    }

    /// Stage one inventory, replacing its table.
    ///
    /// Column names are sanitized and de-duplicated; the in-scope flag
    /// column is appended with default `'No'`. Returns the staged row
    /// count.
    pub fn load_inventory(&mut self, inventory: &Inventory) -> Result<usize> {
        let columns = sanitize::dedupe_columns(
            inventory
                .columns
                .iter()
                .map(|column| sanitize::sanitize_column(column)),
        );
        if columns.is_empty() {
            return Err(StoreError::EmptyInventory);
        }

        let table = Self::table_name(inventory.bank);
        let declarations: Vec<String> = columns
            .iter()
            .map(|column| format!("\"{column}\" TEXT"))
            .collect();
        let create = format!(
            "CREATE TABLE {table} ({}, \"{SCOPE_COLUMN}\" TEXT NOT NULL DEFAULT 'No')",
            declarations.join(", ")
        );
        let quoted: Vec<String> = columns
            .iter()
            .map(|column| format!("\"{column}\""))
            .collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let insert = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            quoted.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;
        tx.execute_batch(&create)?;
        {
            let mut statement = tx.prepare(&insert)?;
            for record in &inventory.records {
                let mut values: Vec<&str> = record.pairs().map(|(_, value)| value).collect();
                values.resize(columns.len(), "");
                statement.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(
            table,
            rows = inventory.records.len(),
            columns = columns.len(),
            "inventory staged"
        );
        Ok(inventory.records.len())
    }

    /// Read a staged inventory back, store column names and all.
    pub fn read_inventory(&self, bank: Bank) -> Result<Inventory> {
        let table = Self::table_name(bank);
        let mut statement = self.conn.prepare(&format!("SELECT * FROM {table}"))?;
        let columns: Vec<String> = statement
            .column_names()
            .iter()
            .map(|name| (*name).to_string())
            .collect();

        let mut inventory = Inventory::new(bank, columns.clone());
        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (index, column) in columns.iter().enumerate() {
                let value: Option<String> = row.get(index)?;
                record.push(column.clone(), value.unwrap_or_default());
            }
            inventory.records.push(record);
        }
        Ok(inventory)
    }

    /// Flag one application as included in the target architecture.
    ///
    /// Auto-committed: each mark is its own transaction. Returns the
    /// number of rows updated.
    pub fn set_in_scope(&self, bank: Bank, name: &str) -> Result<usize> {
        let table = Self::table_name(bank);
        let sql = format!(
            "UPDATE {table} SET \"{SCOPE_COLUMN}\" = 'Si' WHERE \"{NAME_COLUMN}\" = ?1"
        );
        Ok(self.conn.execute(&sql, params![name])?)
    }

    /// Substring search over staged names, for the pending-suggestion
    /// step. Case sensitivity follows SQLite's `LIKE` (ASCII-insensitive).
    pub fn suggest(&self, bank: Bank, fragment: &str, limit: usize) -> Result<Vec<String>> {
        let table = Self::table_name(bank);
        let sql = format!(
            "SELECT DISTINCT \"{NAME_COLUMN}\" FROM {table} \
             WHERE \"{NAME_COLUMN}\" LIKE ?1 ORDER BY \"{NAME_COLUMN}\" LIMIT ?2"
        );
        let pattern = format!("%{fragment}%");
        let mut statement = self.conn.prepare(&sql)?;
        let names = statement
            .query_map(params![pattern, limit as i64], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl appfit_recon::ScopeMarker for Store {
    fn mark_in_scope(&mut self, bank: Bank, matched_name: &str) -> anyhow::Result<()> {
        let updated = self.set_in_scope(bank, matched_name)?;
        anyhow::ensure!(
            updated > 0,
            "no staged row named {matched_name:?} in {}",
            Self::table_name(bank)
        );
        Ok(())
    }
}
