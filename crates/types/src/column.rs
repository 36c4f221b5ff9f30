use serde::{Deserialize, Serialize};

/// How a column's cells are turned into display text. Resolved once when the
/// column set is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Plain,
    Currency,
    Percent,
    Date,
}

/// The operator's view of one data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Field name used to look values up in a row.
    pub key: String,
    /// Header text.
    pub label: String,
    pub visible: bool,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnConfig {
    /// A column whose label is its key.
    pub fn new(key: impl Into<String>, visible: bool, kind: ColumnKind) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            visible,
            kind,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
