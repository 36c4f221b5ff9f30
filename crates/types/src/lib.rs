//! Foundation types for the folio document-composition engine.
//!
//! Everything here is plain data: spreadsheet rows and cells, the operator's
//! column and highlight selections, templates and merge fields, plus the
//! small geometry and color primitives the layout and render crates share.

pub mod cell;
pub mod color;
pub mod column;
pub mod geometry;
pub mod ids;
pub mod selection;
pub mod template;

pub use cell::{CellValue, Row, cell};
pub use color::Color;
pub use column::{ColumnConfig, ColumnKind};
pub use geometry::Rect;
pub use ids::{MergeFieldId, TemplateId};
pub use selection::HighlightedRows;
pub use template::{
    MergeField, MergeFieldValues, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, Template,
};
