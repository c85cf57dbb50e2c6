//! RecordBuilder — turns one data row into a [`NormalizedRecord`], or skips it.

use crate::coerce;
use crate::config::EngineConfig;
use crate::header::HeaderMap;
use crate::merge::{MergeSortEngine, NoteSources};
use crate::types::{CanonicalField, CellValue, DateRange, NormalizedRecord};

#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    engine: MergeSortEngine,
}

impl RecordBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            engine: MergeSortEngine::new(config),
        }
    }

    /// Build the record for `row`, or `None` when its date does not parse or
    /// falls outside `range`. Columns past the end of a short row read as
    /// empty strings.
    pub fn build(
        &self,
        row: &[CellValue],
        map: &HeaderMap,
        range: &DateRange,
    ) -> Option<NormalizedRecord> {
        let raw_date = cell(row, map, CanonicalField::UpdateDate)
            .map(coerce::date_text)
            .unwrap_or_default();
        let Some(date) = coerce::parse_iso_date(&raw_date) else {
            tracing::trace!(raw = %raw_date, "row skipped: unparseable date");
            return None;
        };
        if !range.contains(date) {
            tracing::trace!(%date, %range, "row skipped: outside range");
            return None;
        }

        let text = |field| cell(row, map, field).map(coerce::plain_text).unwrap_or_default();
        let status = text(CanonicalField::Status);
        let task_name = text(CanonicalField::TaskName);
        let progress = text(CanonicalField::CurrentProgress);
        let note = text(CanonicalField::NoteText);

        let notes = self.engine.merge(&NoteSources {
            task_name: &task_name,
            progress: &progress,
            note: &note,
        });

        Some(NormalizedRecord {
            date,
            status,
            task_name,
            notes,
        })
    }
}

fn cell<'a>(row: &'a [CellValue], map: &HeaderMap, field: CanonicalField) -> Option<&'a CellValue> {
    map.column(field).and_then(|col| row.get(col))
}
