use crate::error::PipelineError;
use folio_layout::LayoutConfig;
use folio_portfolio::ColumnSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration of a [`crate::DocumentGenerator`]. Every field may be
/// omitted from the JSON form; omitted fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub layout: LayoutConfig,
    pub schema: ColumnSchema,
    /// Fail on malformed placeholders instead of copying them through.
    pub strict_merge: bool,
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
