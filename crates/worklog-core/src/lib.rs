//! worklog-core — record normalization engine for worklog.
//!
//! Turns loosely structured work-log rows (one row per status update, free
//! text everywhere) into one dated, deduplicated narrative per row.
//!
//! # Architecture
//!
//! ```text
//! RecordBuilder ──► HeaderResolver
//!       │
//!       └──► MergeSortEngine ──► ContentSegmenter
//!                   │
//!                   └──► DateCodeExtractor
//! ```
//!
//! Data flows strictly downward. [`sheet::Engine`] drives the pipeline over a
//! whole [`Workbook`], and [`tally`] aggregates the result per day. Everything
//! is synchronous and pure: the engine only sees rows that the caller already
//! materialized, and every tunable arrives through [`config::EngineConfig`].

pub mod coerce;
pub mod config;
pub mod datecode;
pub mod error;
pub mod header;
pub mod merge;
pub mod record;
pub mod segment;
pub mod sheet;
pub mod tally;
pub mod types;

pub use datecode::{DateCode, DateCodeExtractor};
pub use error::{Error, Result};
pub use header::{HeaderMap, HeaderResolver, Resolution};
pub use merge::{MergeSortEngine, NoteSources};
pub use record::RecordBuilder;
pub use segment::{ContentSegmenter, Fragment};
pub use sheet::{Batch, Engine, RejectedSheet, SheetReport};
pub use types::{
    CanonicalField, CellValue, DateRange, FieldRole, Note, NormalizedRecord, RawSheet, Workbook,
};
