use folio::{CellValue, ColumnConfig, ColumnSchema, Row, Template, build_column_configs};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// One loan in the layout of the servicing export.
pub fn loan(account: &str, borrower: &str, rate: f64, balance: f64, payment: f64) -> Row {
    row(&[
        ("Loan Account", CellValue::text(account)),
        ("Borrower Name", CellValue::text(borrower)),
        ("Interest Rate", CellValue::Number(rate)),
        ("Loan Balance", CellValue::Number(balance)),
        ("Regular Payment", CellValue::Number(payment)),
        ("Lender Notes", CellValue::text("internal")),
    ])
}

pub fn portfolio_rows() -> Vec<Row> {
    vec![
        loan("ML-1001", "Ana Rojas", 8.5, 100_000.0, 950.25),
        loan("ML-1002", "Luis Vega", 9.0, 250_000.0, 2_100.0),
        loan("ML-1003", "Marta Solis", 7.75, 50_000.0, 480.5),
        row(&[
            ("Loan Account", CellValue::text("Portfolio Totals")),
            ("Loan Balance", CellValue::Number(400_000.0)),
        ]),
    ]
}

/// `count` loans with accounts `ML-1` .. `ML-{count}`.
pub fn numbered_loans(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| loan(&format!("ML-{i}"), "Borrower", 8.0, 1_000.0 * i as f64, 10.0))
        .collect()
}

pub fn default_columns(rows: &[Row]) -> Vec<ColumnConfig> {
    build_column_configs(rows, &ColumnSchema::default())
}

pub fn amendment_template() -> Template {
    let mut template = Template::blank("amendment");
    template.title = "Amendment {{Number}}: Portfolio Transfer".to_string();
    template.body = "This amendment transfers the loans below to {{ClientName}} \
                     effective {{EffectiveDate}}. All other terms remain unchanged."
        .to_string();
    template.signature_left = "Diego Quesada\nManager".to_string();
    template.signature_right = "{{ClientName}}\nInvestor".to_string();
    template
}

/// A small solid PNG standing in for a letterhead.
pub fn letterhead_png() -> Vec<u8> {
    let image = RgbImage::from_pixel(8, 10, Rgb([20, 60, 160]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode letterhead");
    bytes
}
