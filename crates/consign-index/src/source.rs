//! Reading the raw input table from disk.
//!
//! Two formats are understood, chosen by file extension:
//! - `.csv`: header row plus records; every cell becomes a string value.
//! - anything else: a JSON array of row objects.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::error::SourceError;
use crate::raw::RawRow;

/// Reads every row of the input table at `path`.
///
/// # Errors
///
/// Returns [`SourceError`] if the file is missing or unreadable, or if its
/// contents are not a JSON array / well-formed CSV.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_csv_rows(path)
    } else {
        load_json_rows(path)
    }
}

fn load_json_rows(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| SourceError::Io {
        path: display.clone(),
        source: e,
    })?;

    // Invalid UTF-8 decodes to U+FFFD instead of failing the parse.
    let text = String::from_utf8_lossy(&bytes);
    let value: Value = serde_json::from_str(&text).map_err(|e| SourceError::Json {
        path: display.clone(),
        source: e,
    })?;

    parse_json_rows(value).ok_or(SourceError::NotAnArray { path: display })
}

/// Converts a parsed JSON document into rows. Array elements that are not
/// objects become empty rows, which coerce to all-default records.
fn parse_json_rows(value: Value) -> Option<Vec<RawRow>> {
    let Value::Array(items) = value else {
        return None;
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => RawRow::new(map),
            other => {
                tracing::debug!(row = idx, kind = json_kind(&other), "non-object row; using defaults");
                RawRow::default()
            }
        })
        .collect();

    Some(rows)
}

fn load_csv_rows(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| SourceError::Io {
        path: display.clone(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));
    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| SourceError::Csv {
            path: display.clone(),
            source: e,
        })?
        .iter()
        .map(lossy)
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(row = idx, error = %e, "unreadable csv record; skipping");
                continue;
            }
        };
        rows.push(RawRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.clone(), lossy(cell))),
        ));
    }

    Ok(rows)
}

/// Decodes a cell, replacing invalid UTF-8 sequences with U+FFFD.
fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
