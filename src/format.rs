//! Output format selection for chat summaries.
//!
//! Library-first format type with no CLI framework dependency.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatstat::Result<()> {
//! use chatstat::core::ChatSummary;
//! use chatstat::format::{OutputFormat, to_format_string};
//! use std::path::Path;
//!
//! let summary = ChatSummary::default();
//! let json = to_format_string(&summary, OutputFormat::Json, false)?;
//!
//! let format = OutputFormat::from_path(Path::new("stats.csv"))?;
//! assert_eq!(format, OutputFormat::Csv);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::ChatSummary;
use crate::error::ChatstatError;

/// Serialization format for a [`ChatSummary`].
///
/// - [`Json`](OutputFormat::Json) - the full summary object (default)
/// - [`Csv`](OutputFormat::Csv) - per-participant table, semicolon delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use chatstat::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv"]
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Csv]
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
        }
    }

    /// Detects format from a file extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidArgument`] for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ChatstatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatstatError::invalid_argument(
                "file extension",
                ext,
                "json, csv",
            )),
        }
    }

    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Json => "json-output",
            OutputFormat::Csv => "csv-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatstatError::invalid_argument("format", s, "json, csv")),
        }
    }
}

fn feature_disabled(format: OutputFormat) -> ChatstatError {
    ChatstatError::invalid_argument(
        "format",
        format.to_string(),
        format.feature(),
    )
}

/// Writes a summary to a file in the specified format.
///
/// `pretty` only affects JSON.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    summary: &ChatSummary,
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), ChatstatError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(summary, path, pretty),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(summary, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts a summary to a string in the specified format.
///
/// # Errors
///
/// Returns an error if the required feature for the format is not enabled.
#[allow(unused_variables)]
pub fn to_format_string(
    summary: &ChatSummary,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, ChatstatError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(summary, pretty),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(summary),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}
