#![cfg(test)]

use crate::{DocumentContent, LayoutConfig, LayoutEngine, TableContent};
use folio_portfolio::{ColumnSchema, build_column_configs, summarize};
use folio_types::{CellValue, HighlightedRows, Row};
use std::sync::Arc;

/// `count` loans with short, single-line cells.
pub fn loan_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            [
                ("Loan Account", CellValue::text(format!("ML-{i:03}"))),
                ("Borrower Name", CellValue::text(format!("Borrower {i}"))),
                ("Interest Rate", CellValue::text("9.50")),
                ("Maturity Date", CellValue::Number(45853.0)),
                ("Term Left", CellValue::Number(12.0)),
                ("Regular Payment", CellValue::Number(750.0)),
                ("Loan Balance", CellValue::Number(90_000.0)),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
        .collect()
}

pub fn table_for(rows: &[Row], highlighted: &HighlightedRows) -> TableContent {
    let schema = ColumnSchema::default();
    let columns = build_column_configs(rows, &schema);
    let summary = summarize(rows, &schema);
    TableContent::build(rows, &columns, highlighted, &summary, &schema)
}

pub fn content(rows: usize, highlighted: &HighlightedRows) -> DocumentContent {
    DocumentContent {
        title: "Amendment \u{2013} Jul 10, 2025".to_string(),
        body: "Here is a summary of the composition of your portfolio:".to_string(),
        table: table_for(&loan_rows(rows), highlighted),
        signature_left: "Diego Felipe Quesada\nManager".to_string(),
        signature_right: "VANESSA GARCIA\nCo-Investor".to_string(),
        letterhead: None,
    }
}

pub fn with_letterhead(mut content: DocumentContent) -> DocumentContent {
    content.letterhead = Some(Arc::new(vec![0xFF, 0xD8, 0xFF]));
    content
}

pub fn engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::default()).unwrap()
}
