//! Daily tally — weighted record counts per day and sheet.
//!
//! This is the data a stacked per-day chart is drawn from. Drawing it is the
//! caller's business.

use crate::sheet::Batch;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Weight applied to sheets without an explicit (or with a negative) weight.
pub const DEFAULT_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetCount {
    pub sheet: String,
    pub records: usize,
    pub weighted: f64,
}

/// One day of the tally. `sheets` lists every accepted sheet in workbook
/// order, including those with no records that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTally {
    pub date: NaiveDate,
    pub sheets: Vec<SheetCount>,
    pub total: f64,
}

pub fn sheet_weight(weights: &HashMap<String, f64>, sheet: &str) -> f64 {
    match weights.get(sheet) {
        Some(&w) if w >= 0.0 => w,
        _ => DEFAULT_WEIGHT,
    }
}

/// Count records per (date, sheet), newest date first.
pub fn daily_tally(batch: &Batch, weights: &HashMap<String, f64>) -> Vec<DailyTally> {
    let mut counts: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (idx, sheet) in batch.sheets.iter().enumerate() {
        for record in &sheet.records {
            counts
                .entry(record.date)
                .or_insert_with(|| vec![0; batch.sheets.len()])[idx] += 1;
        }
    }

    counts
        .into_iter()
        .rev()
        .map(|(date, per_sheet)| {
            let sheets: Vec<SheetCount> = batch
                .sheets
                .iter()
                .zip(per_sheet)
                .map(|(sheet, records)| SheetCount {
                    sheet: sheet.name.clone(),
                    records,
                    weighted: records as f64 * sheet_weight(weights, &sheet.name),
                })
                .collect();
            let total = sheets.iter().map(|s| s.weighted).sum();
            DailyTally {
                date,
                sheets,
                total,
            }
        })
        .collect()
}
