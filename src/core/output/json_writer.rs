//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::models::{ChatSummary, SentimentPercentages};
use crate::error::Result;

/// Summary plus derived fields that are not stored on [`ChatSummary`].
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    summary: &'a ChatSummary,
    sentiment_percentages: SentimentPercentages,
    #[serde(skip_serializing_if = "Option::is_none")]
    most_active: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    fn new(summary: &'a ChatSummary) -> Self {
        Self {
            summary,
            sentiment_percentages: summary.sentiment.percentages(),
            most_active: summary.most_active().map(|(name, _)| name),
        }
    }
}

/// Writes the summary to a JSON file.
///
/// # Format
/// ```json
/// {
///   "total_messages": 2,
///   "participants": {"Alice": {"message_count": 1, ...}},
///   "daily_frequency": {"2023-01-02": 2},
///   "sentiment_percentages": {"neutral": 100.0, ...},
///   ...
/// }
/// ```
pub fn write_json(
    summary: &ChatSummary,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<()> {
    let json = to_json(summary, pretty)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the summary to a JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(summary: &ChatSummary, pretty: bool) -> Result<String> {
    let report = JsonReport::new(summary);
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::Analyzer;
    use crate::parser::TranscriptParser;
    use tempfile::NamedTempFile;

    fn sample() -> ChatSummary {
        let transcript = TranscriptParser::new()
            .parse_str("1/2/23, 9:00 AM - Alice: hello http://x.co 🙂\n1/2/23, 9:05 AM - Bob: hi")
            .unwrap();
        Analyzer::new().analyze(transcript.messages())
    }

    #[test]
    fn test_to_json_fields() {
        let json = to_json(&sample(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_messages"], 2);
        assert_eq!(value["link_count"], 1);
        assert_eq!(value["participants"]["Alice"]["emoji_count"], 1);
        assert_eq!(value["daily_frequency"]["2023-01-02"], 2);
        assert_eq!(value["average_response_seconds"], 300.0);
        assert_eq!(value["chat_span"]["start"], "2023-01-02T09:00:00");
        assert_eq!(value["sentiment_percentages"]["neutral"], 100.0);
        assert_eq!(value["most_active"], "Alice");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), true).unwrap();
        assert!(json.contains("\n  \"total_messages\": 2"));
    }

    #[test]
    fn test_empty_summary_omits_most_active() {
        let json = to_json(&ChatSummary::default(), false).unwrap();
        assert!(!json.contains("most_active"));
        assert!(json.contains("\"chat_span\":null"));
    }

    #[test]
    fn test_write_json() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&sample(), temp_file.path(), true).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains(r#""link_count": 1"#));
    }
}
