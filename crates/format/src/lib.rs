//! Cell formatting.
//!
//! Every function here is total: malformed input degrades to a placeholder
//! (`$0.00`, `-`, or the original text) instead of failing.
//!
//! Percentages are trusted as already being the displayed magnitude. A raw
//! `0.46` renders as `0.46%` and `8.01` as `8.01%`; nothing is rescaled.

mod date;
mod number;

pub use date::{format_date, format_serial_date, parse_date_text};
pub use number::{
    clean_number, format_currency, format_currency_amount, format_percent,
    format_percent_value, parse_numeric_text, to_fixed,
};

use folio_types::{CellValue, ColumnKind};

/// Shown where a value is missing or unusable.
pub const PLACEHOLDER_DASH: &str = "-";

/// Currency rendering of a missing or non-numeric amount.
pub const ZERO_CURRENCY: &str = "$0.00";

/// Formats a cell according to its column kind.
pub fn format_cell(kind: ColumnKind, value: &CellValue) -> String {
    match kind {
        ColumnKind::Currency => format_currency(value),
        ColumnKind::Percent => format_percent(value),
        ColumnKind::Date => format_date(value),
        ColumnKind::Plain => value
            .to_display_string()
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
    }
}
