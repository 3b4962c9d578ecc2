use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Result;
use crate::features::{RawRow, RawValue, ACCOUNTS_FIELD, FEATURE_SCHEMA};

pub fn read_rows(file_path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = File::open(file_path)?;
    read_rows_from_reader(file)
}

// Reads CSV text into raw rows
// Inputs: any reader yielding CSV with a header line
// Outputs: one RawRow per non-blank record
// Key steps:
// 1. Clean header names (BOM, surrounding whitespace)
// 2. Pad short records with empty cells
// 3. Coerce numeric model columns, keep everything else as text
pub fn read_rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    log::debug!("CSV headers: {:?}", headers);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() < headers.len() {
            log::warn!(
                "record {} has {} of {} cells, padding with empty values",
                rows.len() + 1,
                record.len(),
                headers.len()
            );
        }
        rows.push(record_to_row(&headers, &record));
    }

    Ok(rows)
}

fn record_to_row(headers: &[String], record: &StringRecord) -> RawRow {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cell = record.get(i).unwrap_or("");
            (header.clone(), cell_value(header, cell))
        })
        .collect()
}

fn cell_value(header: &str, cell: &str) -> RawValue {
    if header.eq_ignore_ascii_case(ACCOUNTS_FIELD) {
        RawValue::Text(cell.to_string())
    } else if is_numeric_header(header) {
        RawValue::Number(RawValue::Text(cell.to_string()).finite_or_zero())
    } else {
        RawValue::Text(cell.to_string())
    }
}

fn is_numeric_header(header: &str) -> bool {
    header != ACCOUNTS_FIELD && FEATURE_SCHEMA.contains(&header)
}
