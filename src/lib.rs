//! worklog — work-log digest.
//!
//! Reads status spreadsheets (one row per update, free text everywhere) and
//! prints one dated, deduplicated narrative per row. The normalization engine
//! lives in [`worklog_core`], workbook readers in [`worklog_feeds`]; this crate
//! adds the plain-text report the CLI prints.
//!
//! # Architecture
//!
//! ```text
//! Feeds ──► Engine ──► Batch ──► Report
//!                        │
//!                        └──► Tally
//! ```

pub mod report;

pub use worklog_core as engine;
pub use worklog_feeds as feeds;
