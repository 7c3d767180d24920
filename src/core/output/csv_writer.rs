//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::ChatSummary;
use crate::error::Result;

const HEADER: [&str; 5] = ["Sender", "Messages", "Characters", "Emojis", "AvgLength"];

/// Writes the per-participant table to a CSV file.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Sender`, `Messages`, `Characters`, `Emojis`, `AvgLength`
/// - One row per participant, ordered by sender name
/// - Encoding: UTF-8
pub fn write_csv(summary: &ChatSummary, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_table(summary, file)
}

/// Converts the per-participant table to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(summary: &ChatSummary) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(summary, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_table<W: Write>(summary: &ChatSummary, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for (sender, stats) in &summary.participants {
        writer.write_record([
            sender.clone(),
            stats.message_count.to_string(),
            stats.character_count.to_string(),
            stats.emoji_count.to_string(),
            format!("{:.2}", stats.average_message_length()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
