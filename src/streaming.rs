//! Incremental parsing over any `BufRead`.
//!
//! [`MessageStream`] reads one physical line at a time, so memory use stays
//! flat regardless of export size. Each line is decoded lossily: invalid
//! UTF-8 becomes U+FFFD and parsing carries on.
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::TranscriptParser;
//! use std::io::Cursor;
//!
//! let data = "1/2/23, 9:00 AM - Alice: hi\n1/2/23, 9:01 AM - Bob: hey\n";
//! let mut stream = TranscriptParser::new().stream(Cursor::new(data));
//!
//! let first = stream.next().unwrap()?;
//! assert_eq!(first.sender, "Alice");
//! assert_eq!(stream.count(), 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::io::{self, BufRead, ErrorKind};

use crate::Message;
use crate::config::ParserConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::parser::{LineMachine, ParseStats};

/// Iterator of messages parsed from a reader.
///
/// Yields `Err` only for I/O failures, after which the stream is exhausted.
/// A message still pending when the read fails is yielded first, then the error.
/// Per-line problems go to the diagnostic sink `D`.
pub struct MessageStream<R, D = TracingSink> {
    reader: R,
    sink: D,
    machine: LineMachine,
    buf: Vec<u8>,
    line_number: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
    read_error: Option<io::Error>,
}

impl<R: BufRead> MessageStream<R> {
    /// Creates a stream that logs diagnostics via `tracing`.
    pub fn new(reader: R, config: ParserConfig) -> Self {
        Self::with_sink(reader, config, TracingSink)
    }
}

impl<R: BufRead, D: DiagnosticSink> MessageStream<R, D> {
    /// Creates a stream that reports diagnostics to `sink`.
    pub fn with_sink(reader: R, config: ParserConfig, sink: D) -> Self {
        Self {
            reader,
            sink,
            machine: LineMachine::new(config),
            buf: Vec::with_capacity(4096),
            line_number: 0,
            bytes_read: 0,
            total_bytes: None,
            finished: false,
            read_error: None,
        }
    }

    /// Sets the expected input size, enabling [`progress`](Self::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        self.machine.config()
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> &ParseStats {
        self.machine.stats()
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Consumes the stream and returns its diagnostic sink.
    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Bytes consumed from the reader so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Approximate progress as a percentage, if the total size is known.
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            #[allow(clippy::cast_precision_loss)]
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
        }
    }
}

impl<R: BufRead, D: DiagnosticSink> Iterator for MessageStream<R, D> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.read_error.take() {
            return Some(Err(e.into()));
        }

        while !self.finished {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return self.machine.finish().map(Ok);
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;
                    if let Some(message) =
                        self.machine
                            .feed_raw(self.line_number, &self.buf, &mut self.sink)
                    {
                        return Some(Ok(message));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.finished = true;
                    return match self.machine.finish() {
                        Some(message) => {
                            self.read_error = Some(e);
                            Some(Ok(message))
                        }
                        None => Some(Err(e.into())),
                    };
                }
            }
        }
        None
    }
}
