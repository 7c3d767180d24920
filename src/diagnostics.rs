//! Diagnostic events emitted while parsing.
//!
//! The parser never fails on a single bad line. Instead it hands a
//! [`Diagnostic`] to a [`DiagnosticSink`] and carries on. Reporting is
//! fire-and-forget: a sink cannot influence the parse outcome.
//!
//! Available sinks:
//!
//! - [`TracingSink`] (default) forwards events to `tracing`
//! - `Vec<Diagnostic>` collects every event
//! - [`CountingSink`] only tallies events by kind
//!
//! # Example
//!
//! ```rust
//! use chatstat::diagnostics::{Diagnostic, DiagnosticKind};
//! use chatstat::parser::TranscriptParser;
//!
//! let lines = ["garbage before any header", "1/2/23, 9:00 AM - Alice: hi"];
//! let mut events: Vec<Diagnostic> = Vec::new();
//!
//! let transcript = TranscriptParser::new().parse_lines_with(lines, &mut events)?;
//!
//! assert_eq!(transcript.len(), 1);
//! assert_eq!(events[0].kind, DiagnosticKind::MalformedLine);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::fmt;

use serde::Serialize;

/// What went wrong (or was recovered) on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Line matched no header and no message was in progress; dropped.
    MalformedLine,
    /// Header timestamp matched no known layout; the record was dropped.
    UnrecognizedFormat,
    /// Invalid UTF-8 was replaced with U+FFFD; the line was kept.
    EncodingRecoveryApplied,
}

impl DiagnosticKind {
    /// Returns `true` if the event caused data to be dropped.
    pub fn is_drop(self) -> bool {
        !matches!(self, DiagnosticKind::EncodingRecoveryApplied)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MalformedLine => write!(f, "malformed line"),
            DiagnosticKind::UnrecognizedFormat => write!(f, "unrecognized timestamp"),
            DiagnosticKind::EncodingRecoveryApplied => write!(f, "encoding recovery"),
        }
    }
}

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Event category
    pub kind: DiagnosticKind,
    /// 1-based physical line number in the input
    pub line_number: usize,
    /// The offending line content
    pub line: String,
    /// Human-readable explanation
    pub reason: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        line_number: usize,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            line_number,
            line: line.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} ({}): {}",
            self.line_number, self.kind, self.reason, self.line
        )
    }
}

/// Receiver for parse diagnostics.
pub trait DiagnosticSink {
    /// Records one event.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the `tracing` facade.
///
/// Dropped lines are logged at `WARN`, encoding recovery at `DEBUG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::EncodingRecoveryApplied => tracing::debug!(
                line_number = diagnostic.line_number,
                reason = %diagnostic.reason,
                "replaced invalid UTF-8 bytes"
            ),
            kind => tracing::warn!(
                line_number = diagnostic.line_number,
                kind = %kind,
                reason = %diagnostic.reason,
                line = %diagnostic.line,
                "skipping line"
            ),
        }
    }
}

/// Counts diagnostics by kind without keeping the events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountingSink {
    pub malformed_lines: usize,
    pub unrecognized_timestamps: usize,
    pub encoding_recoveries: usize,
}

impl CountingSink {
    /// Total number of events that dropped data.
    pub fn dropped(&self) -> usize {
        self.malformed_lines + self.unrecognized_timestamps
    }
}

impl DiagnosticSink for CountingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::MalformedLine => self.malformed_lines += 1,
            DiagnosticKind::UnrecognizedFormat => self.unrecognized_timestamps += 1,
            DiagnosticKind::EncodingRecoveryApplied => self.encoding_recoveries += 1,
        }
    }
}
