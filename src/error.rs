use crate::ingest::IngestError;
use folio_layout::LayoutError;
use folio_merge::MergeError;
use folio_render_lopdf::RenderError;
use folio_traits::{ResourceError, StoreError};
use thiserror::Error;

/// Every way a document generation can fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Letterhead could not be loaded: {0}")]
    Resource(#[from] ResourceError),

    #[error("Template store error: {0}")]
    Store(#[from] StoreError),

    #[error("Input could not be read: {0}")]
    Ingest(#[from] IngestError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("There is no row data to generate a document from.")]
    EmptyRows,

    #[error("Configuration error: {0}")]
    Config(String),
}
