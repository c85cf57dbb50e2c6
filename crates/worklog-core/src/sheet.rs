//! Batch driver — runs header resolution and record building over a workbook.
//!
//! Failures are scoped to the smallest unit: a sheet missing canonical
//! columns is rejected on its own and a bad row is skipped on its own.
//! Neither stops its siblings.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::header::HeaderResolver;
use crate::record::RecordBuilder;
use crate::types::{CanonicalField, DateRange, NormalizedRecord, RawSheet, Workbook};
use serde::Serialize;

/// Records extracted from one accepted sheet, in input row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub name: String,
    pub records: Vec<NormalizedRecord>,
}

impl SheetReport {
    /// Records newest date first; rows sharing a date keep input order.
    pub fn by_date_desc(&self) -> Vec<&NormalizedRecord> {
        let mut records: Vec<&NormalizedRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }
}

/// A sheet left out of the output because its header lacks canonical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedSheet {
    pub name: String,
    pub missing: Vec<CanonicalField>,
}

/// Everything the engine produced for one workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    pub range: DateRange,
    pub sheets: Vec<SheetReport>,
    pub rejected: Vec<RejectedSheet>,
}

impl Batch {
    pub fn record_count(&self) -> usize {
        self.sheets.iter().map(|s| s.records.len()).sum()
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// A copy keeping only the accepted sheets named in `names`, in workbook
    /// order. An empty `names` keeps every sheet. Rejected sheets are kept.
    pub fn select_sheets<S: AsRef<str>>(&self, names: &[S]) -> Batch {
        if names.is_empty() {
            return self.clone();
        }
        Batch {
            range: self.range,
            sheets: self
                .sheets
                .iter()
                .filter(|s| names.iter().any(|n| n.as_ref() == s.name))
                .cloned()
                .collect(),
            rejected: self.rejected.clone(),
        }
    }
}

/// The assembled pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    resolver: HeaderResolver,
    builder: RecordBuilder,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: HeaderResolver::new(config.headers.clone()),
            builder: RecordBuilder::new(config),
        })
    }

    /// Process one sheet. A sheet without a header row counts as missing
    /// every canonical field.
    pub fn process_sheet(
        &self,
        sheet: &RawSheet,
        range: &DateRange,
    ) -> std::result::Result<SheetReport, RejectedSheet> {
        let resolution = self.resolver.resolve(sheet.header().unwrap_or_default());
        if !resolution.is_complete() {
            tracing::warn!(
                sheet = %sheet.name,
                missing = ?resolution.missing,
                "sheet rejected: missing canonical columns"
            );
            return Err(RejectedSheet {
                name: sheet.name.clone(),
                missing: resolution.missing,
            });
        }
        let map = resolution.map;
        tracing::debug!(sheet = %sheet.name, columns = ?map.iter().collect::<Vec<_>>(), "header resolved");

        let records: Vec<NormalizedRecord> = sheet
            .data_rows()
            .iter()
            .filter_map(|row| self.builder.build(row, &map, range))
            .collect();
        tracing::debug!(
            sheet = %sheet.name,
            rows = sheet.data_rows().len(),
            records = records.len(),
            "sheet processed"
        );

        Ok(SheetReport {
            name: sheet.name.clone(),
            records,
        })
    }

    pub fn process_workbook(&self, workbook: &Workbook, range: DateRange) -> Batch {
        let mut sheets = Vec::new();
        let mut rejected = Vec::new();
        for sheet in &workbook.sheets {
            match self.process_sheet(sheet, &range) {
                Ok(report) => sheets.push(report),
                Err(reject) => rejected.push(reject),
            }
        }
        Batch {
            range,
            sheets,
            rejected,
        }
    }
}
