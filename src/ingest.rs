//! Reading rows and generation inputs from files.
//!
//! Spreadsheet parsing proper happens upstream. These helpers accept the
//! exports that upstream step produces: a JSON array of row objects, or a
//! CSV file whose cells arrive as their displayed text.

use folio_types::{CellValue, ColumnConfig, HighlightedRows, MergeField, MergeFieldValues, Row};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported row file '{0}', expected .json or .csv")]
    UnsupportedFormat(String),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid merge assignment '{0}', expected KEY=VALUE")]
    MergeAssignment(String),

    #[error("invalid row index '{0}'")]
    RowIndex(String),
}

/// Row file formats understood by [`read_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Json,
    Csv,
}

impl RowFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(RowFormat::Json),
            Some("csv") => Ok(RowFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, IngestError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads rows from a `.json` or `.csv` file, chosen by extension.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>, IngestError> {
    let path = path.as_ref();
    let format = RowFormat::from_path(path)?;
    let reader = open(path)?;
    let rows = match format {
        RowFormat::Json => rows_from_json(reader)?,
        RowFormat::Csv => rows_from_csv(reader)?,
    };
    log::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// A JSON array of objects. Strings, numbers, booleans and nulls are
/// accepted as cell values.
pub fn rows_from_json<R: Read>(reader: R) -> Result<Vec<Row>, IngestError> {
    Ok(serde_json::from_reader(reader)?)
}

/// CSV with a header row. Every cell is kept as text; short records read
/// missing trailing cells as empty strings.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Row>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), CellValue::text(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// A JSON array of column configurations.
pub fn read_columns<P: AsRef<Path>>(path: P) -> Result<Vec<ColumnConfig>, IngestError> {
    Ok(serde_json::from_reader(open(path.as_ref())?)?)
}

/// A JSON object of merge values. Keys may be full tokens (`{{ClientName}}`)
/// or labels (`Client Name`).
pub fn read_merge_values<P: AsRef<Path>>(path: P) -> Result<MergeFieldValues, IngestError> {
    let raw: MergeFieldValues = serde_json::from_reader(open(path.as_ref())?)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (merge_key(&key), value))
        .collect())
}

/// Parses `KEY=VALUE`. Only the first `=` separates key from value.
pub fn parse_merge_assignment(assignment: &str) -> Result<(String, String), IngestError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((merge_key(key), value.to_string())),
        _ => Err(IngestError::MergeAssignment(assignment.to_string())),
    }
}

fn merge_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("{{") && key.ends_with("}}") {
        key.to_string()
    } else {
        MergeField::key_for_label(key)
    }
}

/// Parses a comma-separated list of 0-based row indices, e.g. `2,5`.
pub fn parse_highlights(list: &str) -> Result<HighlightedRows, IngestError> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| IngestError::RowIndex(part.to_string()))
        })
        .collect()
}
