//! Table types.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A table decoded from a CSV rendition.
///
/// Cells are always strings; nothing is coerced, so values such as `007`
/// or `1,5` survive unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names from the header row
    pub columns: Vec<String>,

    /// Data rows, each exactly `columns.len()` cells wide
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, padding or truncating it to the column count.
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row and column index.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get the cells of a named column.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Iterate data rows as records keyed by column name.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record {
            columns: &self.columns,
            cells: row,
        })
    }
}

/// One data row keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Look up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.cells.get(index).map(String::as_str)
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Tables serialize as a list of records, one object per data row.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for record in self.records() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["Name".into(), "Code".into()]);
        table.add_row(vec!["Alice".into(), "007".into()]);
        table.add_row(vec!["Bob".into()]);
        table
    }

    #[test]
    fn test_table_new() {
        let table = Table::new(vec!["a".into()]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.cell(1, 1), Some(""));
        assert_eq!(table.column("Code"), Some(vec!["007", ""]));
        assert_eq!(table.column("Missing"), None);
    }

    #[test]
    fn test_record_lookup() {
        let table = sample();
        let first = table.records().next().unwrap();
        assert_eq!(first.get("Name"), Some("Alice"));
        assert_eq!(first.get("Age"), None);
    }

    #[test]
    fn test_serialize_as_records() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"[{"Name":"Alice","Code":"007"},{"Name":"Bob","Code":""}]"#
        );
    }
}
