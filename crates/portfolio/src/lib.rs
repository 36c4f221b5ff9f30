//! Loan-portfolio semantics layered over generic spreadsheet rows: which
//! columns carry balances, payments and rates, how totals are computed, and
//! which columns are shown by default.

mod aggregate;
mod columns;
mod schema;

pub use aggregate::{Aggregates, PortfolioSummary, compute_aggregates, is_total_row, summarize};
pub use columns::{build_column_configs, toggle_column, visible_columns};
pub use schema::ColumnSchema;
