//! Table harvesting from CSV renditions.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{DocumentElement, Table};
use crate::parser::ResourceSource;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode every top-level table in the stream.
///
/// A table whose rendition is missing or fails to decode is logged and
/// skipped; the remaining tables are still returned in stream order.
pub fn harvest_tables<S>(elements: &[DocumentElement], resources: &S) -> Vec<Table>
where
    S: ResourceSource + ?Sized,
{
    let mut tables = Vec::new();

    for element in elements.iter().filter(|e| e.path.is_table_container()) {
        match load_table(element, resources) {
            Ok(table) => tables.push(table),
            Err(e) => log::error!("Error parsing table {}: {}", element.path, e),
        }
    }

    log::debug!("Harvested {} tables", tables.len());
    tables
}

fn load_table<S>(element: &DocumentElement, resources: &S) -> Result<Table>
where
    S: ResourceSource + ?Sized,
{
    let name = element.first_attachment().ok_or_else(|| {
        Error::ResourceNotFound(format!("no rendition attached to {}", element.path))
    })?;
    let data = resources.resource(name)?;
    decode_table(data).map_err(|e| e.in_resource(name))
}

/// Decode a CSV rendition into a string table.
///
/// The first record is the header. Blank header cells become `Unnamed: <i>`
/// and repeated names get `.1`, `.2`, ... suffixes. Short rows are padded;
/// a row with more fields than the header is an error.
pub fn decode_table(data: &[u8]) -> Result<Table> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(Error::TableParse {
                resource: String::new(),
                message: "no header row".into(),
            })
        }
    };

    let mut table = Table::new(column_names(header.iter()));

    for (index, record) in records.enumerate() {
        let record = record?;
        if record.len() > table.column_count() {
            return Err(Error::TableParse {
                resource: String::new(),
                message: format!(
                    "expected {} fields in line {}, saw {}",
                    table.column_count(),
                    index + 2,
                    record.len()
                ),
            });
        }
        table.add_row(record.iter().map(str::to_string).collect());
    }

    Ok(table)
}

fn column_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (index, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }

        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
