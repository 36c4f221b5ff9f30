use crate::{PLACEHOLDER_DASH, ZERO_CURRENCY};
use folio_types::CellValue;
use rust_decimal::{Decimal, RoundingStrategy};

/// Drops every character except digits, `.` and `-`, then reads the longest
/// numeric prefix. `"$1,234.50"` is `1234.5`, `"1.2.3"` is `1.2`, and text
/// without a leading number yields `None`.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_float_prefix(&stripped)
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone trailing dot after digits is still part of the number.
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    let mut literal = s[..end].to_string();
    if literal.ends_with('.') {
        literal.pop();
    }
    literal.parse().ok()
}

/// Numeric coercion used by the aggregator. Numbers pass through, blanks are
/// zero and text goes through [`parse_numeric_text`], falling back to zero.
pub fn clean_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Empty => 0.0,
        CellValue::Text(s) => parse_numeric_text(s).unwrap_or(0.0),
    }
}

/// Fixed-point rendering with `digits` fraction digits, rounding half away
/// from zero on the exact binary value of `value`.
pub fn to_fixed(value: f64, digits: u32) -> String {
    let negative = value < 0.0;
    let Some(magnitude) = Decimal::from_f64_retain(value.abs()) else {
        return format!("{:.*}", digits as usize, value);
    };
    let mut rounded =
        magnitude.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(digits);

    let body = rounded.to_string();
    if negative { format!("-{body}") } else { body }
}

fn group_thousands(integer: &str) -> String {
    let mut out = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$` prefix, thousands separators, exactly two decimals. Negative amounts
/// carry a leading minus unless they round to zero.
pub fn format_currency_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_CURRENCY.to_string();
    }
    let fixed = to_fixed(amount.abs(), 2);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{fraction}", group_thousands(integer))
}

pub fn format_currency(value: &CellValue) -> String {
    let amount = match value {
        CellValue::Empty => None,
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_numeric_text(s),
    };
    match amount {
        Some(amount) => format_currency_amount(amount),
        None => ZERO_CURRENCY.to_string(),
    }
}

/// Two decimals and a `%` suffix. The value is not rescaled.
pub fn format_percent_value(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER_DASH.to_string();
    }
    format!("{}%", to_fixed(value, 2))
}

pub fn format_percent(value: &CellValue) -> String {
    let number = match value {
        CellValue::Empty => None,
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_numeric_text(s),
    };
    number
        .map(format_percent_value)
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
}
