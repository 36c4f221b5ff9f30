//! Loan-portfolio document composition.
//!
//! A [`DocumentGenerator`] takes a template, spreadsheet rows, column
//! choices, row highlights, merge values and an optional letterhead, and
//! produces a paginated US Letter PDF: title, merged body text, the loan
//! table with a totals footer, and two signature blocks.

pub mod config;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod store;

pub use config::GeneratorConfig;
pub use error::PipelineError;
pub use generator::{
    DocumentGenerator, DocumentGeneratorBuilder, GeneratedDocument, GenerationRequest,
    generate_document, load_letterhead, sanitize_file_name,
};
pub use store::{JsonFileTemplateStore, LETTERHEAD_SETTING, TemplateCatalog};

pub use folio_format as format;
pub use folio_layout::LayoutConfig;
pub use folio_portfolio::{ColumnSchema, build_column_configs, summarize, toggle_column};
pub use folio_traits::{InMemoryTemplateStore, SharedResourceData, StoreError, TemplateStore};
pub use folio_types::{
    CellValue, ColumnConfig, ColumnKind, HighlightedRows, MergeField, MergeFieldId,
    MergeFieldValues, Row, Template, TemplateId,
};
