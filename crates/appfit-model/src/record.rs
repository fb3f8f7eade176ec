//! Application records and per-bank inventories.

use serde::{Deserialize, Serialize};

use crate::Bank;

/// One application row from an inventory.
///
/// Columns are kept in source order and may repeat: upstream
/// de-duplication produces suffixed copies of the same logical column,
/// and reads always take the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    /// Raw value of the first occurrence of `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed value of the first occurrence of `column`; blank cells
    /// resolve to `None`.
    pub fn value(&self, column: &str) -> Option<&str> {
        let trimmed = self.get(column)?.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// All (column, value) pairs in source order, duplicates included.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All records of one bank's inventory, plus the column order they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub bank: Bank,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Inventory {
    pub fn new(bank: Bank, columns: Vec<String>) -> Self {
        Self {
            bank,
            columns,
            records: Vec::new(),
        }
    }

    /// Non-blank application names in row order.
    pub fn names<'a>(&'a self, name_column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records
            .iter()
            .filter_map(move |record| record.value(name_column))
    }

    /// First record whose name column equals `name` (trimmed comparison).
    ///
    /// Duplicate rows for one canonical name should not exist after lookup
    /// construction, but if they do the first row wins.
    pub fn find_by_name(&self, name_column: &str, name: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.value(name_column) == Some(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_columns_read_first_occurrence() {
        let record = Record::from_pairs([("banco", "first"), ("banco", "second")]);
        assert_eq!(record.get("banco"), Some("first"));
    }

    #[test]
    fn blank_values_resolve_to_none() {
        let record = Record::from_pairs([("seguridad", "   "), ("ux", " SI ")]);
        assert_eq!(record.value("seguridad"), None);
        assert_eq!(record.value("ux"), Some("SI"));
        assert_eq!(record.value("missing"), None);
    }

    #[test]
    fn find_by_name_takes_first_matching_row() {
        let mut inventory = Inventory::new(Bank::Buyer, vec!["aplicacion sistema".into()]);
        inventory
            .records
            .push(Record::from_pairs([("aplicacion sistema", "Portal"), ("fila", "1")]));
        inventory
            .records
            .push(Record::from_pairs([("aplicacion sistema", "Portal"), ("fila", "2")]));

        let found = inventory.find_by_name("aplicacion sistema", " Portal ").unwrap();
        assert_eq!(found.get("fila"), Some("1"));
    }
}
