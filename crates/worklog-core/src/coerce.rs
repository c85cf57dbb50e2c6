//! Cell coercion — the only place that branches on what kind of value a
//! spreadsheet cell holds.
//!
//! Everything past this boundary sees trimmed strings and [`NaiveDate`]s.

use crate::types::CellValue;
use chrono::NaiveDate;

const ISO_DATE: &str = "%Y-%m-%d";

/// Render the update-date column as a `YYYY-MM-DD` candidate.
///
/// Date-typed cells format directly. Slash dates (`2024/3/1`, optionally
/// followed by a time) are read positionally. A text whose leading token,
/// split on a space, is already an ISO date yields that token.
/// Anything else comes back trimmed and unchanged, to be rejected by
/// [`parse_iso_date`].
pub fn date_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::DateTime(dt) => dt.format(ISO_DATE).to_string(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.contains('/') {
                if let Some(date) = parse_slash_date(s) {
                    return date.format(ISO_DATE).to_string();
                }
            }
            if let Some((head, _)) = s.split_once(' ') {
                if parse_iso_date(head).is_some() {
                    return head.to_string();
                }
            }
            s.to_string()
        }
    }
}

/// Render any non-date column as plain trimmed text.
pub fn plain_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => format_number(*n),
        CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Strict `YYYY-MM-DD` parse.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE).ok()
}

fn parse_slash_date(s: &str) -> Option<NaiveDate> {
    let head = s.split(' ').next()?;
    let mut parts = head.split('/').map(|p| p.trim().parse::<u32>());
    let year = parts.next()?.ok()?;
    let month = parts.next()?.ok()?;
    let day = parts.next()?.ok()?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
