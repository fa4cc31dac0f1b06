//! Error handling for adledger
//!
//! Typed errors for the calculation, report and export layers, plus the
//! plumbing error enum used by the store and CLI. Plumbing code uses the
//! anyhow-based `Result` alias for context chaining.

use itertools::Itertools;
use thiserror::Error;

use crate::export::SectionKind;

/// Core error types for ledger plumbing (store, config, CLI input)
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("database error: {0}")]
    DbError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// A record field the core could not interpret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: invalid {field} ({message})", describe_record(.record_id))]
pub struct DataError {
    pub record_id: Option<i64>,
    pub field: &'static str,
    pub message: String,
}

impl DataError {
    pub fn new(record_id: Option<i64>, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            record_id,
            field,
            message: message.into(),
        }
    }
}

fn describe_record(id: &Option<i64>) -> String {
    match id {
        Some(id) => format!("record #{}", id),
        None => "unsaved record".to_string(),
    }
}

/// Every malformed record found in one pass over a collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} malformed record(s): {}", .0.len(), .0.iter().join("; "))]
pub struct InvalidRecords(pub Vec<DataError>);

/// Why a report section could not be built
#[derive(Error, Debug, Clone)]
pub enum SectionFailure {
    #[error(transparent)]
    InvalidRecords(#[from] InvalidRecords),

    #[error("section task aborted: {0}")]
    Aborted(String),
}

/// A named report section failed
#[derive(Error, Debug, Clone)]
#[error("section '{section}' failed: {source}")]
pub struct SectionBuildError {
    pub section: SectionKind,
    #[source]
    pub source: SectionFailure,
}

/// The spreadsheet sink could not produce a document
#[derive(Error, Debug)]
#[error("spreadsheet generation failed: {message}")]
pub struct SinkError {
    pub message: String,
}

impl From<rust_xlsxwriter::XlsxError> for SinkError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Failure of a whole export run
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no records to export")]
    EmptyExport,

    #[error("{} report section(s) failed: {}", .0.len(), .0.iter().join("; "))]
    Sections(Vec<SectionBuildError>),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to save document")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Sections named in a `Sections` failure, in report order.
    pub fn failed_sections(&self) -> Vec<SectionKind> {
        match self {
            ExportError::Sections(errors) => errors.iter().map(|e| e.section).sorted().collect(),
            _ => Vec::new(),
        }
    }
}

/// Result type alias for ledger plumbing
pub type Result<T> = anyhow::Result<T>;
