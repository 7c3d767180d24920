//! Transcript parser for plain-text chat exports.
//!
//! [`TranscriptParser`] drives the [line classifier](crate::parsing::classify_line)
//! and the [timestamp normalizer](crate::parsing::normalize_timestamp) over a
//! whole export and yields an ordered [`Transcript`]. Bad lines never abort
//! the parse: they are skipped and reported to a [`DiagnosticSink`].
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::TranscriptParser;
//!
//! let export = "\
//! 1/2/23, 9:00 AM - Alice: hello
//! 1/2/23, 9:05 AM - Bob: hi,
//! how are you?
//! 1/2/23, 9:06 AM - Bob left";
//!
//! let transcript = TranscriptParser::new().parse_str(export)?;
//!
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(transcript.messages()[1].body, "hi,\nhow are you?");
//! assert_eq!(transcript.stats().system_notifications, 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```
//!
//! # Large files
//!
//! [`TranscriptParser::stream`] reads from any `BufRead` one line at a time
//! and yields messages as soon as they are complete:
//!
//! ```rust,no_run
//! use chatstat::parser::TranscriptParser;
//! use std::path::Path;
//!
//! let parser = TranscriptParser::new();
//! for message in parser.stream_file(Path::new("chat.txt"))? {
//!     let message = message?;
//!     println!("{}: {}", message.sender, message.body);
//! }
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::Message;
use crate::config::ParserConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use crate::error::{ChatstatError, LineError, Result};
use crate::parsing::{LineKind, classify_line, normalize_timestamp};
use crate::streaming::MessageStream;

/// Counters collected while parsing one transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Physical lines consumed
    pub lines_read: usize,
    /// Message records produced
    pub messages: usize,
    /// Group-management and encryption notices skipped
    pub system_notifications: usize,
    /// Lines folded into the previous message body
    pub continuation_lines: usize,
    /// Empty or whitespace-only lines skipped
    pub blank_lines: usize,
    /// Lines dropped because no message was in progress
    pub malformed_lines: usize,
    /// Headers dropped because their timestamp matched no layout
    pub unrecognized_timestamps: usize,
    /// Lines that contained invalid UTF-8
    pub encoding_recoveries: usize,
}

impl ParseStats {
    /// Lines that were dropped with a diagnostic.
    pub fn dropped(&self) -> usize {
        self.malformed_lines + self.unrecognized_timestamps
    }
}

/// Ordered message records from one export, plus parse counters.
///
/// Order is file order. Records are neither deduplicated nor re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    stats: ParseStats,
}

impl Transcript {
    /// Number of message records.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl AsRef<[Message]> for Transcript {
    fn as_ref(&self) -> &[Message] {
        &self.messages
    }
}

impl IntoIterator for Transcript {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Message being assembled from a header and its continuation lines.
///
/// A `None` timestamp marks a header that failed normalization: its
/// continuation lines are still absorbed so they do not surface as
/// malformed, but nothing is emitted on flush.
#[derive(Debug)]
struct PendingMessage {
    timestamp: Option<NaiveDateTime>,
    sender: String,
    body: String,
}

impl PendingMessage {
    fn into_message(self) -> Option<Message> {
        Some(Message::new(self.timestamp?, self.sender, self.body))
    }
}

/// Line-at-a-time state machine shared by the batch parser and [`MessageStream`].
#[derive(Debug)]
pub(crate) struct LineMachine {
    config: ParserConfig,
    pending: Option<PendingMessage>,
    stats: ParseStats,
}

impl LineMachine {
    pub(crate) fn new(config: ParserConfig) -> Self {
        Self {
            config,
            pending: None,
            stats: ParseStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub(crate) fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decodes one raw line (newline optional) and feeds it.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD and reported; the line is kept.
    pub(crate) fn feed_raw(
        &mut self,
        line_number: usize,
        raw: &[u8],
        sink: &mut dyn DiagnosticSink,
    ) -> Option<Message> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);

        if let Cow::Owned(ref decoded) = line {
            self.stats.encoding_recoveries += 1;
            sink.report(Diagnostic::new(
                DiagnosticKind::EncodingRecoveryApplied,
                line_number,
                decoded.as_str(),
                "invalid UTF-8 replaced with U+FFFD",
            ));
        }

        self.feed(line_number, &line, sink)
    }

    /// Feeds one decoded line. Returns the previous message if this line completed it.
    pub(crate) fn feed(
        &mut self,
        line_number: usize,
        line: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<Message> {
        self.stats.lines_read += 1;

        let mut line = line.strip_suffix('\r').unwrap_or(line);
        if self.stats.lines_read == 1 {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }

        let kind = classify_line(
            line,
            self.pending.is_some(),
            self.config.skip_system_messages,
        );

        match kind {
            LineKind::Blank => {
                self.stats.blank_lines += 1;
                None
            }
            LineKind::SystemNotification => {
                self.stats.system_notifications += 1;
                None
            }
            LineKind::MessageHeader {
                date,
                time,
                sender,
                body,
            } => {
                let completed = self.flush();

                let timestamp = match normalize_timestamp(date, time, self.config.date_order) {
                    Ok(ts) => Some(ts),
                    Err(err) => {
                        self.stats.unrecognized_timestamps += 1;
                        sink.report(Diagnostic::new(
                            DiagnosticKind::UnrecognizedFormat,
                            line_number,
                            line,
                            err.to_string(),
                        ));
                        None
                    }
                };

                self.pending = Some(PendingMessage {
                    timestamp,
                    sender: sender.to_string(),
                    body: body.to_string(),
                });
                completed
            }
            LineKind::Continuation { text } => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.body.push('\n');
                    pending.body.push_str(text);
                }
                self.stats.continuation_lines += 1;
                None
            }
            LineKind::Unmatched => {
                self.stats.malformed_lines += 1;
                sink.report(Diagnostic::new(
                    DiagnosticKind::MalformedLine,
                    line_number,
                    line,
                    LineError::MalformedLine.to_string(),
                ));
                None
            }
        }
    }

    /// Flushes the message in progress at end of input.
    pub(crate) fn finish(&mut self) -> Option<Message> {
        self.flush()
    }

    fn flush(&mut self) -> Option<Message> {
        let message = self.pending.take()?.into_message()?;
        self.stats.messages += 1;
        Some(message)
    }
}

/// Splits raw bytes into lines without the trailing newline.
fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    (!bytes.is_empty())
        .then(|| body.split(|&b| b == b'\n'))
        .into_iter()
        .flatten()
}

/// Parser for plain-text chat exports.
///
/// Holds only configuration, so one parser can be shared across threads and
/// reused for any number of files.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an ordered sequence of lines, logging diagnostics via `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<Transcript>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_lines_with(lines, &mut TracingSink)
    }

    /// Parses an ordered sequence of lines, reporting diagnostics to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse_lines_with<I, S>(
        &self,
        lines: I,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Transcript>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut machine = LineMachine::new(self.config.clone());
        let mut messages = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            messages.extend(machine.feed(index + 1, line.as_ref(), sink));
        }
        messages.extend(machine.finish());

        Self::complete(messages, *machine.stats())
    }

    /// Parses an export already held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse_str(&self, content: &str) -> Result<Transcript> {
        self.parse_lines(content.lines())
    }

    /// Parses raw bytes, replacing invalid UTF-8 instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Transcript> {
        self.parse_bytes_with(bytes, &mut TracingSink)
    }

    /// Like [`parse_bytes`](Self::parse_bytes), reporting diagnostics to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse_bytes_with(
        &self,
        bytes: &[u8],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Transcript> {
        let mut machine = LineMachine::new(self.config.clone());
        let mut messages = Vec::new();

        for (index, raw) in split_lines(bytes).enumerate() {
            messages.extend(machine.feed_raw(index + 1, raw, sink));
        }
        messages.extend(machine.finish());

        Self::complete(messages, *machine.stats())
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::Io`] if the file cannot be read, or
    /// [`ChatstatError::NoValidMessages`] if no record survives.
    pub fn parse(&self, path: &Path) -> Result<Transcript> {
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "parsing transcript");
        self.parse_bytes(&data)
    }

    /// Streams messages from any buffered reader.
    pub fn stream<R: BufRead>(&self, reader: R) -> MessageStream<R> {
        MessageStream::new(reader, self.config.clone())
    }

    /// Streams messages from any buffered reader, reporting diagnostics to `sink`.
    pub fn stream_with<R: BufRead, D: DiagnosticSink>(
        &self,
        reader: R,
        sink: D,
    ) -> MessageStream<R, D> {
        MessageStream::with_sink(reader, self.config.clone(), sink)
    }

    /// Opens a file and streams its messages using the configured buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::Io`] if the file cannot be opened.
    pub fn stream_file(&self, path: &Path) -> Result<MessageStream<BufReader<File>>> {
        let file = File::open(path)?;
        let total = file.metadata()?.len();
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        Ok(self.stream(reader).with_total_bytes(total))
    }

    fn complete(messages: Vec<Message>, stats: ParseStats) -> Result<Transcript> {
        tracing::debug!(
            lines = stats.lines_read,
            messages = stats.messages,
            system = stats.system_notifications,
            dropped = stats.dropped(),
            "transcript parsed"
        );

        if messages.is_empty() {
            return Err(ChatstatError::no_valid_messages(stats.lines_read));
        }
        Ok(Transcript { messages, stats })
    }
}
