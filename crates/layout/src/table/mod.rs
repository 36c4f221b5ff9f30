//! The portfolio table: what each cell says, and how rows are measured,
//! styled and spread over pages.

mod content;
mod paginate;

pub use content::{BodyRow, CellAlign, FooterCell, TableContent, TOTALS_LABEL};
pub use paginate::column_widths;
