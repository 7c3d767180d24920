//! Configuration types for the transcript parser.
//!
//! These are plain structs with builder methods and no CLI framework
//! dependencies, so they work the same from library code and from the binary.
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{DateOrder, ParserConfig};
//! use chatstat::parser::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::DayFirst)
//!     .with_skip_system_messages(true);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatstatError;

/// Priority policy for ambiguous numeric dates such as `03/04/25`.
///
/// The timestamp normalizer tries layouts in a fixed order and the first exact
/// match wins. This enum picks which field order is tried first. Out-of-range
/// values still force the other reading: under [`MonthFirst`](DateOrder::MonthFirst)
/// `13/04/25` is April 13th because 13 is not a valid month.
///
/// | Policy | Order tried |
/// |--------|-------------|
/// | `MonthFirst` (default) | `M/D/Y`, `D/M/Y`, `Y/M/D` |
/// | `DayFirst` | `D/M/Y`, `M/D/Y`, `Y/M/D` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// US-style exports: `1/15/24, 10:30 AM`
    #[default]
    MonthFirst,
    /// European-style exports: `15/01/2024, 10:30`
    DayFirst,
}

impl DateOrder {
    /// Returns all accepted names, including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["month-first", "mdy", "us", "day-first", "dmy", "eu"]
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::MonthFirst => write!(f, "month-first"),
            DateOrder::DayFirst => write!(f, "day-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = ChatstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month-first" | "mdy" | "us" => Ok(DateOrder::MonthFirst),
            "day-first" | "dmy" | "eu" => Ok(DateOrder::DayFirst),
            _ => Err(ChatstatError::invalid_argument(
                "date order",
                s,
                "month-first, mdy, us, day-first, dmy, eu",
            )),
        }
    }
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatstat::config::ParserConfig;
///
/// let config = ParserConfig::new().with_skip_system_messages(false);
/// assert!(!config.skip_system_messages);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Which date layout family is tried first (default: month-first)
    pub date_order: DateOrder,

    /// Drop group-management and encryption notices (default: true)
    pub skip_system_messages: bool,

    /// Read buffer size for streaming from a reader (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::default(),
            skip_system_messages: true,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date layout priority.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets whether system notifications are dropped.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets the read buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.date_order, DateOrder::MonthFirst);
        assert!(config.skip_system_messages);
        assert_eq!(config.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_builder_chain() {
        let config = ParserConfig::new()
            .with_date_order(DateOrder::DayFirst)
            .with_skip_system_messages(false)
            .with_buffer_size(1024);
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert!(!config.skip_system_messages);
        assert_eq!(config.buffer_size, 1024);
    }

    #[test]
    fn test_date_order_from_str() {
        assert_eq!("month-first".parse::<DateOrder>().unwrap(), DateOrder::MonthFirst);
        assert_eq!("MDY".parse::<DateOrder>().unwrap(), DateOrder::MonthFirst);
        assert_eq!("day-first".parse::<DateOrder>().unwrap(), DateOrder::DayFirst);
        assert_eq!("eu".parse::<DateOrder>().unwrap(), DateOrder::DayFirst);

        let err = "ymd".parse::<DateOrder>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_date_order_display_roundtrip() {
        for order in [DateOrder::MonthFirst, DateOrder::DayFirst] {
            assert_eq!(order.to_string().parse::<DateOrder>().unwrap(), order);
        }
    }

    #[test]
    fn test_config_serde() {
        let config = ParserConfig::new().with_date_order(DateOrder::DayFirst);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"day-first\""));
        let parsed: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.date_order, DateOrder::DayFirst);
    }
}
