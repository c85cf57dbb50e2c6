//! worklog-feeds — workbook source adapters for worklog.
//!
//! Each source reads a workbook from somewhere and hands the engine fully
//! materialized [`worklog_core::Workbook`] values: one header row plus data
//! rows of typed cells per sheet.

pub mod json;

pub use json::JsonWorkbook;

use worklog_core::Workbook;

/// Errors raised while reading a workbook.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed workbook document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Trait implemented by each workbook source.
pub trait WorkbookSource {
    fn load(&self) -> Result<Workbook, FeedError>;
}
