//! Core types for worklog-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! raw [`CellValue`]s handed over by the workbook reader, the five
//! [`CanonicalField`]s every sheet must expose, the [`DateRange`] filter, and
//! the [`NormalizedRecord`] the engine produces.

use crate::datecode::DateCode;
use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input model
// ---------------------------------------------------------------------------

/// One spreadsheet cell as materialized by the workbook reader.
///
/// Everything downstream of [`coerce`](crate::coerce) works on plain strings
/// and dates.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// A single sheet: `rows[0]` is the header row, the rest are data rows.
/// Rows need not share a length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// An ordered collection of sheets, in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<RawSheet>,
}

// ---------------------------------------------------------------------------
// Canonical fields
// ---------------------------------------------------------------------------

/// The five semantic columns every accepted sheet must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    UpdateDate,
    Status,
    TaskName,
    CurrentProgress,
    NoteText,
}

impl CanonicalField {
    /// Declared resolution order. Header matching walks fields in this order,
    /// so an earlier field wins a column both could claim.
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::UpdateDate,
        CanonicalField::Status,
        CanonicalField::TaskName,
        CanonicalField::CurrentProgress,
        CanonicalField::NoteText,
    ];

    pub(crate) fn slot(self) -> usize {
        match self {
            CanonicalField::UpdateDate => 0,
            CanonicalField::Status => 1,
            CanonicalField::TaskName => 2,
            CanonicalField::CurrentProgress => 3,
            CanonicalField::NoteText => 4,
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalField::UpdateDate => write!(f, "UpdateDate"),
            CanonicalField::Status => write!(f, "Status"),
            CanonicalField::TaskName => write!(f, "TaskName"),
            CanonicalField::CurrentProgress => write!(f, "CurrentProgress"),
            CanonicalField::NoteText => write!(f, "NoteText"),
        }
    }
}

/// Which free-text field a note fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Progress,
    Task,
    Note,
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRole::Progress => write!(f, "progress"),
            FieldRole::Task => write!(f, "task"),
            FieldRole::Note => write!(f, "note"),
        }
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive range of naive calendar dates used to filter rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// `[today - days, today]`, the window the exporter uses by default.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Output model
// ---------------------------------------------------------------------------

/// One rendered note line of a record's narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Field the fragment was first seen in.
    pub origin: FieldRole,
    /// Embedded `MMDD` code, [`DateCode::NONE`] when there is none.
    pub code: DateCode,
    /// Literal prefix, present for tagged notes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// The fragment text, trimmed and never empty.
    pub text: String,
}

impl Note {
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}{}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// A data row that survived date filtering, with its merged narrative.
///
/// `notes` is ordered newest-dated group first, after any undated notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub status: String,
    pub task_name: String,
    pub notes: Vec<Note>,
}

impl NormalizedRecord {
    /// The narrative as display strings, tags applied.
    pub fn note_lines(&self) -> Vec<String> {
        self.notes.iter().map(ToString::to_string).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(DateRange::new(date(2024, 3, 2), date(2024, 3, 1)).is_err());
        assert!(DateRange::new(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[test]
    fn range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 12, 31)));
        assert!(!range.contains(date(2025, 1, 1)));
    }

    #[test]
    fn trailing_window_ends_today() {
        let range = DateRange::trailing(date(2024, 3, 15), 7);
        assert_eq!(range.start, date(2024, 3, 8));
        assert_eq!(range.end, date(2024, 3, 15));
    }

    #[test]
    fn sheet_splits_header_from_data() {
        let sheet = RawSheet::new("s", vec![vec!["h".into()], vec!["a".into()], vec![]]);
        assert_eq!(sheet.header().map(<[_]>::len), Some(1));
        assert_eq!(sheet.data_rows().len(), 2);
        assert!(RawSheet::new("empty", vec![]).data_rows().is_empty());
    }

    #[test]
    fn tagged_note_displays_prefix() {
        let note = Note {
            origin: FieldRole::Task,
            code: DateCode::NONE,
            tag: Some("Note:".to_string()),
            text: "Kickoff".to_string(),
        };
        assert_eq!(note.to_string(), "Note:Kickoff");
    }
}
