//! The message record produced by the transcript parser.
//!
//! A [`Message`] is created once per recognized message header, after its
//! timestamp has been normalized and any continuation lines have been folded
//! into the body. Records that fail either step are never constructed.
//!
//! # Example
//!
//! ```
//! use chatstat::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "hello");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One message from a chat transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | When the message was sent (no timezone) |
/// | `sender` | `String` | Display name exactly as written in the header |
/// | `body` | `String` | Message text; continuation lines joined with `\n` |
///
/// Timestamps serialize as ISO 8601 without offset, e.g. `2023-01-02T09:00:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as written in the export.
    pub timestamp: NaiveDateTime,

    /// Display name of the author.
    pub sender: String,

    /// Text content. May contain newlines for multi-line messages.
    pub body: String,
}

impl Message {
    /// Creates a new message record.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date, ignoring time of day.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Number of physical lines the body spans.
    pub fn line_count(&self) -> usize {
        self.body.lines().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(ts(12, 0), "Alice", "Hello");
        assert_eq!(msg.sender(), "Alice");
        assert_eq!(msg.body(), "Hello");
        assert_eq!(msg.timestamp(), ts(12, 0));
        assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_line_count() {
        assert_eq!(Message::new(ts(1, 0), "A", "").line_count(), 1);
        assert_eq!(Message::new(ts(1, 0), "A", "one").line_count(), 1);
        assert_eq!(Message::new(ts(1, 0), "A", "one\ntwo\nthree").line_count(), 3);
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new(ts(9, 5), "Bob", "hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"Bob\""));
        assert!(json.contains("2024-06-15T09:05:00"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
