//! Spreadsheet rows as delivered by the ingestion collaborator.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single spreadsheet cell. Cells are either the displayed text of the
/// sheet, a raw number, or absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// True for missing cells and empty strings, the two values a
    /// spreadsheet export uses for "nothing here".
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String coercion used for plain table cells. `None` for a missing cell.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CellDef {
            Number(f64),
            Bool(bool),
            Text(String),
            Null(()),
        }

        Ok(match Option::<CellDef>::deserialize(deserializer)? {
            None | Some(CellDef::Null(())) => CellValue::Empty,
            Some(CellDef::Number(n)) => CellValue::Number(n),
            Some(CellDef::Bool(b)) => CellValue::Text(b.to_string()),
            Some(CellDef::Text(s)) => CellValue::Text(s),
        })
    }
}

/// One spreadsheet row, keyed by column name in sheet order.
pub type Row = IndexMap<String, CellValue>;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Looks up a cell, treating a missing key as an empty cell. Rows may be
/// heterogeneous, so every lookup goes through here.
pub fn cell<'a>(row: &'a Row, key: &str) -> &'a CellValue {
    row.get(key).unwrap_or(&EMPTY_CELL)
}
