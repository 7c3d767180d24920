//! Line-level parsing building blocks.
//!
//! - [`timestamp`] turns raw date and time tokens into `NaiveDateTime`
//! - [`classifier`] decides what a single line of an export is
//!
//! Both are pure functions over `&str`. The stateful part (pending message
//! buffer, diagnostics) lives in [`crate::parser`].

pub mod classifier;
pub mod timestamp;

pub use classifier::{
    LineKind, SYSTEM_PATTERNS, classify_line, is_system_notification, match_header,
};
pub use timestamp::{
    DateLayout, FieldOrder, date_layouts, normalize_timestamp, normalize_whitespace, parse_date,
    parse_time,
};
