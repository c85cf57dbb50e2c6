//! Domain-specific assertion macros for worklog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which record or sheet broke an engine invariant.

/// Assert the rendered note lines of a record, in order.
///
/// ```rust
/// assert_notes!(record, ["0301 done", "Note:0301 Kickoff"]);
/// ```
#[macro_export]
macro_rules! assert_notes {
    ($record:expr, [$($line:expr),* $(,)?]) => {{
        let record: &worklog_core::NormalizedRecord = &$record;
        let expected: Vec<String> = vec![$($line.to_string()),*];
        pretty_assertions::assert_eq!(
            record.note_lines(),
            expected,
            "notes of record dated {} ({:?})",
            record.date,
            record.task_name
        );
    }};
}

/// Assert that no two notes of a record share the same text.
#[macro_export]
macro_rules! assert_no_duplicate_notes {
    ($record:expr) => {{
        let record: &worklog_core::NormalizedRecord = &$record;
        let mut seen = std::collections::HashSet::new();
        for note in &record.notes {
            if !seen.insert(note.text.as_str()) {
                panic!(
                    "assert_no_duplicate_notes! failed: {:?} appears twice in record dated {}",
                    note.text, record.date
                );
            }
        }
    }};
}

/// Assert that a batch rejected `sheet` for exactly the `missing` fields.
#[macro_export]
macro_rules! assert_rejected {
    ($batch:expr, $sheet:expr, [$($field:expr),* $(,)?]) => {{
        let batch: &worklog_core::Batch = &$batch;
        let name: &str = $sheet;
        match batch.rejected.iter().find(|r| r.name == name) {
            Some(rejected) => pretty_assertions::assert_eq!(
                rejected.missing,
                vec![$($field),*],
                "missing fields of rejected sheet {:?}",
                name
            ),
            None => panic!(
                "assert_rejected! failed: sheet {:?} was not rejected.\n  Rejected: {:?}",
                name,
                batch.rejected.iter().map(|r| &r.name).collect::<Vec<_>>()
            ),
        }
        if batch.sheets.iter().any(|s| s.name == name) {
            panic!("assert_rejected! failed: sheet {:?} also appears in the output", name);
        }
    }};
}
