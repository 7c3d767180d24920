//! Summary writers.
//!
//! - [`write_json`] / [`to_json`] - the full [`ChatSummary`](crate::core::models::ChatSummary)
//!   as a JSON object - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - per-participant table with semicolon
//!   delimiter - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::core::aggregate::Analyzer;
//! use chatstat::core::output::{to_csv, write_json};
//! use chatstat::parser::TranscriptParser;
//! use std::path::Path;
//!
//! let transcript = TranscriptParser::new().parse(Path::new("chat.txt"))?;
//! let summary = Analyzer::new().analyze(transcript.messages());
//!
//! write_json(&summary, "summary.json", true)?;
//! let table = to_csv(&summary)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
