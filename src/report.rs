//! Plain-text digest of a [`Batch`].
//!
//! One block per sheet: a `date | status | task` line per record followed by
//! its note lines, newest record first. Rejected sheets and the daily tally
//! follow.

use std::fmt::Write;
use worklog_core::tally::DailyTally;
use worklog_core::Batch;

const RULE_WIDTH: usize = 80;
const SHEET_RULE_WIDTH: usize = 50;

pub fn render(batch: &Batch, tally: &[DailyTally]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, batch, tally);
    out
}

fn write_report(out: &mut String, batch: &Batch, tally: &[DailyTally]) -> std::fmt::Result {
    let per_sheet = batch
        .sheets
        .iter()
        .map(|s| format!("{}: {}", s.name, s.records.len()))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Work log digest")?;
    writeln!(out, "Range: {}", batch.range)?;
    writeln!(out, "Total: {} records ({per_sheet})", batch.record_count())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    for sheet in &batch.sheets {
        writeln!(out)?;
        writeln!(out, "[{}]", sheet.name)?;
        writeln!(out, "{}", "-".repeat(SHEET_RULE_WIDTH))?;
        if sheet.records.is_empty() {
            writeln!(out, "(no records in range)")?;
            continue;
        }
        for (i, record) in sheet.by_date_desc().into_iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{} | {} | {}", record.date, record.status, record.task_name)?;
            for note in &record.notes {
                writeln!(out, "{note}")?;
            }
        }
    }

    if !batch.rejected.is_empty() {
        writeln!(out)?;
        writeln!(out, "Rejected sheets:")?;
        for sheet in &batch.rejected {
            let missing = sheet
                .missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "  {}: missing {missing}", sheet.name)?;
        }
    }

    if !tally.is_empty() {
        writeln!(out)?;
        writeln!(out, "Daily tally:")?;
        for day in tally {
            let parts = day
                .sheets
                .iter()
                .map(|s| format!("{} {:.1}", s.sheet, s.weighted))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(out, "  {}  {parts}  = {:.1}", day.date, day.total)?;
        }
    }
    Ok(())
}
