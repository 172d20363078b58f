//! Error types for the VR benefit engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every structural failure that aborts a pipeline run. Per-row data
//! quality gaps are not errors; they are reported as
//! [`DataQualityWarning`](crate::models::DataQualityWarning)s.

use thiserror::Error;

/// The main error type for the VR benefit engine.
///
/// # Example
///
/// ```
/// use vr_engine::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     source_name: "active_workers".to_string(),
///     column: "MATRICULA".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Source 'active_workers' is missing required column 'MATRICULA'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot work with.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// A source extract was not found.
    #[error("Source '{source_name}' not found at {path}")]
    SourceNotFound {
        /// The logical source name.
        source_name: String,
        /// The path that was tried.
        path: String,
    },

    /// A source extract could not be read as a table.
    #[error("Failed to read source '{source_name}': {message}")]
    SourceParseError {
        /// The logical source name.
        source_name: String,
        /// A description of the read error.
        message: String,
    },

    /// A source extract lacks a column the pipeline needs.
    #[error("Source '{source_name}' is missing required column '{column}'")]
    MissingColumn {
        /// The logical source name.
        source_name: String,
        /// The column that was expected.
        column: String,
    },

    /// A cell could not be converted to the type its column requires.
    #[error("Source '{source_name}', row {row}, column '{column}': cannot parse '{value}'")]
    InvalidField {
        /// The logical source name.
        source_name: String,
        /// The 1-based data row (header excluded).
        row: usize,
        /// The column holding the value.
        column: String,
        /// The raw cell text.
        value: String,
    },

    /// A worker id appears more than once in a source keyed by worker id.
    #[error("Source '{source_name}' contains worker id {worker_id} more than once")]
    DuplicateWorkerId {
        /// The logical source name.
        source_name: String,
        /// The repeated worker id.
        worker_id: u64,
    },

    /// A lookup key appears more than once in a per-state table.
    #[error("Source '{source_name}' contains key '{key}' more than once")]
    DuplicateKey {
        /// The logical source name.
        source_name: String,
        /// The repeated key.
        key: String,
    },

    /// The target competency is not a valid (month, year) pair.
    #[error("Invalid competency {month}/{year}: month must be 1-12 and year positive")]
    InvalidCompetency {
        /// The month supplied by the caller.
        month: u32,
        /// The year supplied by the caller.
        year: i32,
    },

    /// Publishing the final table failed.
    #[error("Failed to publish table '{table}': {message}")]
    PublishError {
        /// The table being published.
        table: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by the caller's parameters rather
    /// than by the configured sources or store.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, EngineError::InvalidCompetency { .. })
    }

    /// Returns true for errors caused by the shape or content of a source.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            EngineError::SourceNotFound { .. }
                | EngineError::SourceParseError { .. }
                | EngineError::MissingColumn { .. }
                | EngineError::InvalidField { .. }
                | EngineError::DuplicateWorkerId { .. }
                | EngineError::DuplicateKey { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
