//! Test builders — ergonomic constructors for sheets, rows and workbooks.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::NaiveDate;
use worklog_core::{CellValue, DateRange, RawSheet, Workbook};

// ---------------------------------------------------------------------------
// Cells and rows
// ---------------------------------------------------------------------------

/// A row of text cells.
pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|&c| CellValue::from(c)).collect()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A date-typed cell at 09:00 on the given day.
pub fn date_cell(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::DateTime(ymd(y, m, d).and_hms_opt(9, 0, 0).expect("valid test time"))
}

/// The whole of 2024.
pub fn year_2024() -> DateRange {
    DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)).expect("valid range")
}

// ---------------------------------------------------------------------------
// SheetBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawSheet`] fixtures.
///
/// # Example
///
/// ```rust
/// let sheet = SheetBuilder::new("Ops")
///     .header(CANONICAL_HEADER)
///     .row(&["2024/3/1", "Alice", "0301 Kickoff", "0301 done", ""])
///     .build();
/// ```
pub struct SheetBuilder {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn header(mut self, cells: &[&str]) -> Self {
        self.rows.insert(0, text_row(cells));
        self
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(text_row(cells));
        self
    }

    pub fn cells(mut self, cells: Vec<CellValue>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn build(self) -> RawSheet {
        RawSheet::new(self.name, self.rows)
    }
}

pub fn workbook(sheets: Vec<RawSheet>) -> Workbook {
    Workbook { sheets }
}
