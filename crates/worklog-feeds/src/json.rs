//! JSON workbook documents.
//!
//! ```json
//! {"sheets": [{"name": "Ops", "rows": [["更新進度", "狀態"], ["2024/3/1", null]]}]}
//! ```
//!
//! A cell is `null`, a number, a string, a boolean, or a date object:
//! `{"datetime": "2024-03-01T09:00:00"}` / `{"date": "2024-03-01"}`.

use crate::{FeedError, WorkbookSource};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use worklog_core::{CellValue, RawSheet, Workbook};

#[derive(Deserialize)]
struct Document {
    sheets: Vec<SheetDoc>,
}

#[derive(Deserialize)]
struct SheetDoc {
    name: String,
    #[serde(default)]
    rows: Vec<Vec<Option<CellDoc>>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellDoc {
    Number(f64),
    Bool(bool),
    Text(String),
    DateTime { datetime: NaiveDateTime },
    Date { date: NaiveDate },
}

impl From<CellDoc> for CellValue {
    fn from(cell: CellDoc) -> Self {
        match cell {
            CellDoc::Number(n) => CellValue::Number(n),
            CellDoc::Bool(b) => CellValue::Text(if b { "TRUE" } else { "FALSE" }.to_string()),
            CellDoc::Text(s) => CellValue::Text(s),
            CellDoc::DateTime { datetime } => CellValue::DateTime(datetime),
            CellDoc::Date { date } => CellValue::from(date),
        }
    }
}

/// Parse a JSON workbook document held in memory.
pub fn parse_workbook(input: &str) -> Result<Workbook, FeedError> {
    let doc: Document = serde_json::from_str(input)?;
    let sheets = doc
        .sheets
        .into_iter()
        .map(|sheet| {
            let rows = sheet
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(CellValue::from).collect())
                .collect();
            RawSheet::new(sheet.name, rows)
        })
        .collect();
    Ok(Workbook { sheets })
}

/// A JSON workbook document on disk.
#[derive(Debug, Clone)]
pub struct JsonWorkbook {
    path: PathBuf,
}

impl JsonWorkbook {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WorkbookSource for JsonWorkbook {
    fn load(&self) -> Result<Workbook, FeedError> {
        let input = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let workbook = parse_workbook(&input)?;
        tracing::debug!(
            path = %self.path.display(),
            sheets = workbook.sheets.len(),
            "workbook loaded"
        );
        Ok(workbook)
    }
}
