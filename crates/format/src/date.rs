use crate::PLACEHOLDER_DASH;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_types::CellValue;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SERIAL_UNIX_OFFSET_DAYS: f64 = 25569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// Renders a spreadsheet date as `MM/DD/YYYY`.
///
/// Numbers are treated as spreadsheet day serials, with the fractional part
/// as time of day and the calendar date taken in UTC. Text is parsed with the
/// common date layouts; text that is not a date comes back unchanged. Empty
/// cells and a zero serial render as `-`.
pub fn format_date(value: &CellValue) -> String {
    match value {
        CellValue::Empty => PLACEHOLDER_DASH.to_string(),
        CellValue::Number(n) if *n == 0.0 || n.is_nan() => PLACEHOLDER_DASH.to_string(),
        CellValue::Number(n) => {
            format_serial_date(*n).unwrap_or_else(|| CellValue::Number(*n).to_string())
        }
        CellValue::Text(s) if s.is_empty() => PLACEHOLDER_DASH.to_string(),
        CellValue::Text(s) => match parse_date_text(s) {
            Some(date) => date.format(DISPLAY_FORMAT).to_string(),
            None => s.clone(),
        },
    }
}

/// `None` when the serial falls outside the representable calendar.
pub fn format_serial_date(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - SERIAL_UNIX_OFFSET_DAYS) * MILLIS_PER_DAY + 0.5).floor();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    let instant = DateTime::from_timestamp_millis(millis as i64)?;
    Some(instant.date_naive().format(DISPLAY_FORMAT).to_string())
}

/// Recognises ISO dates and timestamps, `M/D/YYYY`, `M-D-YYYY` and month
/// name layouts such as `Jul 10, 2025` or `July 10, 2025`. Purely numeric text is not a date.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() || text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.date_naive());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(stamp.date());
        }
    }
    for layout in [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%b %d, %Y",
        "%b %d %Y",
        "%d %b %Y",
        "%B %d, %Y",
        "%B %d %Y",
        "%d %B %Y",
    ] {
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return Some(date);
        }
    }

    month_first(text, '/').or_else(|| month_first(text, '-'))
}

/// `M/D/YY` and `M/D/YYYY`. Two-digit years follow the 1950 pivot.
fn month_first(text: &str, separator: char) -> Option<NaiveDate> {
    let mut parts = text.split(separator);
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(numeric(month) && numeric(day) && numeric(year)) || month.len() > 2 || day.len() > 2 {
        return None;
    }

    let year: i32 = match year.len() {
        2 => {
            let short: i32 = year.parse().ok()?;
            if short < 50 { 2000 + short } else { 1900 + short }
        }
        4 => year.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serial_dates_use_spreadsheet_epoch() {
        assert_eq!(format_date(&CellValue::Number(25569.0)), "01/01/1970");
        assert_eq!(format_date(&CellValue::Number(45853.0)), "07/15/2025");
        assert_eq!(format_date(&CellValue::Number(45853.75)), "07/15/2025");
        assert_eq!(format_date(&CellValue::Number(1.0)), "12/31/1899");
    }

    #[test]
    fn missing_dates_render_dash() {
        assert_eq!(format_date(&CellValue::Empty), "-");
        assert_eq!(format_date(&CellValue::text("")), "-");
        assert_eq!(format_date(&CellValue::Number(0.0)), "-");
    }

    #[test]
    fn text_dates_are_normalised() {
        assert_eq!(format_date(&CellValue::text("2025-07-10")), "07/10/2025");
        assert_eq!(format_date(&CellValue::text("2025-07-10T15:30:00Z")), "07/10/2025");
        assert_eq!(format_date(&CellValue::text("7/4/2025")), "07/04/2025");
        assert_eq!(format_date(&CellValue::text("12/31/99")), "12/31/1999");
        assert_eq!(format_date(&CellValue::text("Jul 10, 2025")), "07/10/2025");
        assert_eq!(format_date(&CellValue::text("July 10, 2025")), "07/10/2025");
    }

    #[test]
    fn full_month_names_are_dates() {
        assert_eq!(format_date(&CellValue::text("September 3, 2024")), "09/03/2024");
        assert_eq!(format_date(&CellValue::text("March 1 2025")), "03/01/2025");
        assert_eq!(format_date(&CellValue::text("10 July 2025")), "07/10/2025");
        assert_eq!(format_date(&CellValue::text("Julember 10, 2025")), "Julember 10, 2025");
    }

    #[test]
    fn unparseable_text_passes_through() {
        assert_eq!(format_date(&CellValue::text("not a date")), "not a date");
        assert_eq!(format_date(&CellValue::text("13/45/2025")), "13/45/2025");
        assert_eq!(format_date(&CellValue::text("45853")), "45853");
    }
}
