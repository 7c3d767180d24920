//! Unified error types for chatstat.
//!
//! Two layers of failure exist:
//!
//! - [`LineError`] describes a problem with a single line or record. These are
//!   always recovered locally by the parser (the record is dropped and the
//!   event is reported to a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)).
//! - [`ChatstatError`] is what public operations return. Only whole-transcript
//!   failures ([`ChatstatError::NoValidMessages`]), I/O and serialization
//!   errors reach the caller.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred while reading a transcript or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No message records survived parsing.
    ///
    /// An empty result is indistinguishable from feeding the wrong file, so
    /// the parser reports it explicitly instead of returning an empty summary.
    #[error("No valid messages found in the chat file ({lines_read} lines read)")]
    NoValidMessages {
        /// Number of physical lines that were read
        lines_read: usize,
    },

    /// A configuration value could not be interpreted.
    #[error("Invalid {name} '{value}'. Expected one of: {expected}")]
    InvalidArgument {
        /// Name of the setting
        name: &'static str,
        /// The value that was provided
        value: String,
        /// Accepted values
        expected: &'static str,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Recoverable, per-line failures.
///
/// These never abort a parse. The transcript parser converts them into
/// [`Diagnostic`](crate::diagnostics::Diagnostic) events and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The date/time tokens matched none of the known layouts.
    #[error("Unrecognized timestamp format: '{input}'")]
    UnrecognizedFormat {
        /// The normalized date and time text that failed to parse
        input: String,
    },

    /// The line matched no message structure and no message was in progress.
    #[error("Line matches no message header and no message is in progress")]
    MalformedLine,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a "no valid messages" error.
    pub fn no_valid_messages(lines_read: usize) -> Self {
        ChatstatError::NoValidMessages { lines_read }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(
        name: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        ChatstatError::InvalidArgument {
            name,
            value: value.into(),
            expected,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if no messages survived parsing.
    pub fn is_no_valid_messages(&self) -> bool {
        matches!(self, ChatstatError::NoValidMessages { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ChatstatError::InvalidArgument { .. })
    }
}

impl LineError {
    /// Creates an unrecognized timestamp error.
    pub fn unrecognized(input: impl Into<String>) -> Self {
        LineError::UnrecognizedFormat {
            input: input.into(),
        }
    }
}
