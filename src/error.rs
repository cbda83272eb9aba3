//! Error types for stopdex.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`StopdexError`] enum. The variants follow the pipeline's failure taxonomy:
//! unreadable input, aggregation inconsistencies, malformed intermediate
//! records and stage I/O failures.
//!
//! # Examples
//!
//! ```
//! use stopdex::error::{Result, StopdexError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(StopdexError::invalid_argument("rate must be at most 100"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for stopdex operations.
#[derive(Error, Debug)]
pub enum StopdexError {
    /// I/O errors not attributed to a specific stage.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus or one of its documents could not be read.
    #[error("Input error: {0}")]
    Input(String),

    /// The global vocabulary size could not be finalized consistently.
    #[error("Aggregation error in {stage} stage: {message} (expected {expected}, observed {observed})")]
    Aggregation {
        stage: String,
        message: String,
        expected: String,
        observed: String,
    },

    /// A single intermediate record could not be parsed.
    #[error("Malformed record in {artifact} at line {line}: {message}")]
    MalformedRecord {
        artifact: String,
        line: usize,
        message: String,
    },

    /// A stage artifact could not be persisted or read back.
    #[error("Stage I/O error in {stage} stage: {message}")]
    StageIo { stage: String, message: String },

    /// Storage backend errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analysis errors (tokenization, filtering).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with StopdexError.
pub type Result<T> = std::result::Result<T, StopdexError>;

impl StopdexError {
    /// Create a new input error.
    pub fn input<S: Into<String>>(msg: S) -> Self {
        StopdexError::Input(msg.into())
    }

    /// Create a new aggregation error.
    pub fn aggregation<S, M, E, O>(stage: S, message: M, expected: E, observed: O) -> Self
    where
        S: Into<String>,
        M: Into<String>,
        E: ToString,
        O: ToString,
    {
        StopdexError::Aggregation {
            stage: stage.into(),
            message: message.into(),
            expected: expected.to_string(),
            observed: observed.to_string(),
        }
    }

    /// Create a new malformed record error.
    pub fn malformed_record<A: Into<String>, M: Into<String>>(
        artifact: A,
        line: usize,
        message: M,
    ) -> Self {
        StopdexError::MalformedRecord {
            artifact: artifact.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a new stage I/O error.
    pub fn stage_io<S: Into<String>, M: Into<String>>(stage: S, message: M) -> Self {
        StopdexError::StageIo {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        StopdexError::Storage(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        StopdexError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StopdexError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        StopdexError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StopdexError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        StopdexError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error may be skipped by the stage that produced it.
    ///
    /// Only malformed records are recoverable; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StopdexError::MalformedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = StopdexError::input("missing directory");
        assert_eq!(error.to_string(), "Input error: missing directory");

        let error = StopdexError::stage_io("select", "manifest not found");
        assert_eq!(
            error.to_string(),
            "Stage I/O error in select stage: manifest not found"
        );

        let error = StopdexError::aggregation("select", "vocabulary size mismatch", 4, 3);
        assert_eq!(
            error.to_string(),
            "Aggregation error in select stage: vocabulary size mismatch (expected 4, observed 3)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = StopdexError::from(io_error);

        match error {
            StopdexError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_only_malformed_records_are_recoverable() {
        let error = StopdexError::malformed_record("frequencies.tsv", 3, "bad count");
        assert!(error.is_recoverable());
        assert!(!StopdexError::input("gone").is_recoverable());
        assert!(!StopdexError::aggregation("select", "w", 1, 2).is_recoverable());
    }
}
