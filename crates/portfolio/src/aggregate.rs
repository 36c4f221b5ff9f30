use crate::ColumnSchema;
use folio_format::{clean_number, to_fixed};
use folio_types::{Row, cell};
use serde::Serialize;

/// Portfolio totals over the rows that are not subtotal rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregates {
    pub total_balance: f64,
    pub total_regular_payment: f64,
    /// Balance-weighted mean interest rate. Zero when the total balance is
    /// not positive.
    pub portfolio_yield: f64,
    pub loan_count: usize,
}

impl Aggregates {
    /// Footer text for the borrower column.
    pub fn yield_label(&self) -> String {
        format!(
            "Portfolio Yield: {}% ({} loans)",
            to_fixed(self.portfolio_yield, 4),
            self.loan_count
        )
    }
}

/// Aggregates together with the positions of the rows they were computed
/// from. The table renders exactly these rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioSummary {
    pub aggregates: Aggregates,
    /// Indices into the input row slice, ascending.
    pub retained: Vec<usize>,
}

/// A subtotal row embedded in the sheet, detected by "total" appearing
/// anywhere in the account cell, case-insensitively.
pub fn is_total_row(row: &Row, schema: &ColumnSchema) -> bool {
    cell(row, &schema.account_key)
        .to_display_string()
        .is_some_and(|account| account.to_lowercase().contains("total"))
}

pub fn summarize(rows: &[Row], schema: &ColumnSchema) -> PortfolioSummary {
    let mut summary = PortfolioSummary::default();
    let mut weighted_rate_sum = 0.0;

    for (index, row) in rows.iter().enumerate() {
        if is_total_row(row, schema) {
            log::debug!("Row {index} is a totals row, excluded from aggregates");
            continue;
        }
        let balance = clean_number(cell(row, &schema.balance_key));
        let payment = clean_number(cell(row, &schema.payment_key));
        let rate = clean_number(cell(row, &schema.rate_key));

        summary.aggregates.total_balance += balance;
        summary.aggregates.total_regular_payment += payment;
        weighted_rate_sum += rate * balance;
        summary.retained.push(index);
    }

    let totals = &mut summary.aggregates;
    totals.loan_count = summary.retained.len();
    totals.portfolio_yield = if totals.total_balance > 0.0 {
        weighted_rate_sum / totals.total_balance
    } else {
        0.0
    };
    summary
}

pub fn compute_aggregates(rows: &[Row], schema: &ColumnSchema) -> Aggregates {
    summarize(rows, schema).aggregates
}
