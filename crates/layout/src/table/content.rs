use folio_format::{format_cell, format_currency_amount};
use folio_portfolio::{ColumnSchema, PortfolioSummary, visible_columns};
use folio_types::{ColumnConfig, HighlightedRows, Row, cell};

pub const TOTALS_LABEL: &str = "Totals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    /// Position of the row in the loaded data.
    pub source_index: usize,
    pub cells: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterCell {
    pub text: String,
    pub align: CellAlign,
}

impl FooterCell {
    fn new(text: impl Into<String>, align: CellAlign) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }
}

/// Display text of the table, one entry per visible column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableContent {
    pub header: Vec<String>,
    pub body: Vec<BodyRow>,
    pub footer: Vec<FooterCell>,
}

impl TableContent {
    /// Formats the retained rows of `summary` for the visible columns and
    /// appends the totals footer.
    pub fn build(
        rows: &[Row],
        columns: &[ColumnConfig],
        highlighted: &HighlightedRows,
        summary: &PortfolioSummary,
        schema: &ColumnSchema,
    ) -> Self {
        let visible = visible_columns(columns);

        for index in highlighted.iter() {
            if summary.retained.binary_search(&index).is_err() {
                log::debug!("Highlighted row {index} is not rendered, ignoring highlight");
            }
        }

        let body = summary
            .retained
            .iter()
            .filter_map(|&index| rows.get(index).map(|row| (index, row)))
            .map(|(index, row)| BodyRow {
                source_index: index,
                cells: visible
                    .iter()
                    .map(|column| format_cell(column.kind, cell(row, &column.key)))
                    .collect(),
                highlighted: highlighted.contains(index),
            })
            .collect();

        let totals = &summary.aggregates;
        let footer = visible
            .iter()
            .enumerate()
            .map(|(position, column)| {
                let key = column.key.as_str();
                if position == 0 {
                    FooterCell::new(TOTALS_LABEL, CellAlign::Left)
                } else if key == schema.borrower_key {
                    FooterCell::new(totals.yield_label(), CellAlign::Left)
                } else if key == schema.balance_key {
                    FooterCell::new(format_currency_amount(totals.total_balance), CellAlign::Center)
                } else if key == schema.payment_key {
                    FooterCell::new(
                        format_currency_amount(totals.total_regular_payment),
                        CellAlign::Center,
                    )
                } else {
                    FooterCell::new("", CellAlign::Center)
                }
            })
            .collect();

        Self {
            header: visible.iter().map(|column| column.label.clone()).collect(),
            body,
            footer,
        }
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_portfolio::{build_column_configs, summarize};
    use folio_types::CellValue;
    use pretty_assertions::assert_eq;

    fn loan(account: &str, borrower: &str, balance: f64, payment: f64, rate: &str) -> Row {
        [
            ("Loan Account", CellValue::text(account)),
            ("Borrower Name", CellValue::text(borrower)),
            ("Interest Rate", CellValue::text(rate)),
            ("Maturity Date", CellValue::Number(45853.0)),
            ("Regular Payment", CellValue::Number(payment)),
            ("Loan Balance", CellValue::Number(balance)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn sample() -> (Vec<Row>, Vec<ColumnConfig>, ColumnSchema) {
        let schema = ColumnSchema::default();
        let rows = vec![
            loan("ML-001", "Ana Ruiz", 100_000.0, 1_000.0, "8.00"),
            loan("Subtotal", "", 100_000.0, 1_000.0, ""),
            loan("ML-002", "Luis Pardo", 50_000.0, 500.5, "11.00"),
        ];
        let columns = build_column_configs(&rows, &schema);
        (rows, columns, schema)
    }

    #[test]
    fn formats_cells_by_column_kind() {
        let (rows, columns, schema) = sample();
        let summary = summarize(&rows, &schema);
        let table = TableContent::build(&rows, &columns, &HighlightedRows::new(), &summary, &schema);

        assert_eq!(
            table.header,
            ["Loan Account", "Borrower Name", "Interest Rate", "Maturity Date", "Regular Payment", "Loan Balance"]
        );
        assert_eq!(table.body.len(), 2);
        assert_eq!(
            table.body[0].cells,
            ["ML-001", "Ana Ruiz", "8.00%", "07/15/2025", "$1,000.00", "$100,000.00"]
        );
        assert_eq!(table.body[1].source_index, 2);
    }

    #[test]
    fn footer_carries_totals_and_yield() {
        let (rows, columns, schema) = sample();
        let summary = summarize(&rows, &schema);
        let table = TableContent::build(&rows, &columns, &HighlightedRows::new(), &summary, &schema);

        let texts: Vec<&str> = table.footer.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Totals", "Portfolio Yield: 9.0000% (2 loans)", "", "", "$1,500.50", "$150,000.00"]
        );
        assert_eq!(table.footer[0].align, CellAlign::Left);
        assert_eq!(table.footer[1].align, CellAlign::Left);
        assert_eq!(table.footer[5].align, CellAlign::Center);
    }

    #[test]
    fn highlights_follow_source_indices() {
        let (rows, columns, schema) = sample();
        let summary = summarize(&rows, &schema);
        let highlighted: HighlightedRows = [1, 2].into_iter().collect();
        let table = TableContent::build(&rows, &columns, &highlighted, &summary, &schema);

        let flags: Vec<bool> = table.body.iter().map(|r| r.highlighted).collect();
        assert_eq!(flags, [false, true]);
    }

    #[test]
    fn first_column_footer_wins_over_borrower() {
        let (rows, mut columns, schema) = sample();
        columns.retain(|c| c.key != "Loan Account");
        let summary = summarize(&rows, &schema);
        let table = TableContent::build(&rows, &columns, &HighlightedRows::new(), &summary, &schema);
        assert_eq!(table.header[0], "Borrower Name");
        assert_eq!(table.footer[0].text, "Totals");
    }

    #[test]
    fn missing_plain_value_renders_dash() {
        let schema = ColumnSchema::default();
        let rows = vec![
            [("Loan Account".to_string(), CellValue::text("ML-9"))].into_iter().collect::<Row>(),
        ];
        let columns = vec![
            ColumnConfig::new("Loan Account", true, schema.kind_for("Loan Account")),
            ColumnConfig::new("Term Left", true, schema.kind_for("Term Left")),
        ];
        let summary = summarize(&rows, &schema);
        let table = TableContent::build(&rows, &columns, &HighlightedRows::new(), &summary, &schema);
        assert_eq!(table.body[0].cells, ["ML-9", "-"]);
    }
}
