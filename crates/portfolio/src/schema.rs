use folio_types::ColumnKind;
use serde::{Deserialize, Serialize};

/// Names the columns the portfolio logic depends on and assigns formatting
/// kinds to column keys.
///
/// The defaults match the loan-servicing export the tool was built around.
/// Every field is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    /// Identifies the loan. A row whose account contains "total" is a
    /// subtotal row and is excluded from aggregates and the table.
    pub account_key: String,
    /// Column whose footer cell shows the portfolio yield and loan count.
    pub borrower_key: String,
    pub balance_key: String,
    pub payment_key: String,
    pub rate_key: String,
    pub currency_keys: Vec<String>,
    pub percent_keys: Vec<String>,
    pub date_keys: Vec<String>,
    /// Columns visible when a fresh column set is built from data.
    pub default_visible: Vec<String>,
}

impl ColumnSchema {
    /// Formatting kind for a column key. Currency wins over percent, percent
    /// over date, when a key is listed more than once.
    pub fn kind_for(&self, key: &str) -> ColumnKind {
        let listed = |keys: &[String]| keys.iter().any(|k| k == key);
        if listed(&self.currency_keys) {
            ColumnKind::Currency
        } else if listed(&self.percent_keys) {
            ColumnKind::Percent
        } else if listed(&self.date_keys) {
            ColumnKind::Date
        } else {
            ColumnKind::Plain
        }
    }

    pub fn is_default_visible(&self, key: &str) -> bool {
        self.default_visible.iter().any(|k| k == key)
    }
}

fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            account_key: "Loan Account".to_string(),
            borrower_key: "Borrower Name".to_string(),
            balance_key: "Loan Balance".to_string(),
            payment_key: "Regular Payment".to_string(),
            rate_key: "Interest Rate".to_string(),
            currency_keys: strings(&["Loan Balance", "Regular Payment"]),
            percent_keys: strings(&["Interest Rate", "Percent Owned"]),
            date_keys: strings(&["Maturity Date", "Next Payment Date", "Interest Paid To Date"]),
            default_visible: strings(&[
                "Loan Account",
                "Borrower Name",
                "Interest Rate",
                "Maturity Date",
                "Term Left",
                "Regular Payment",
                "Loan Balance",
            ]),
        }
    }
}
