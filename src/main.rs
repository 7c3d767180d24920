//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::fs::File;
use std::io::{BufReader, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use chatstat::ChatstatError;
use chatstat::cli::Args;
use chatstat::core::{Analyzer, ChatSummary};
use chatstat::format::{OutputFormat, to_format_string, write_to_format};
use chatstat::parser::TranscriptParser;

fn main() {
    let args = <Args as ClapParser>::parse();
    setup_logging(args.log_filter());

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over the `-v`/`-q` flags when set.
fn setup_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatError> {
    let start = Instant::now();
    let parser = TranscriptParser::with_config(args.parser_config());
    let analyzer = Analyzer::new();

    tracing::info!(
        input = %args.input.display(),
        date_order = %parser.config().date_order,
        streaming = args.streaming,
        "analyzing transcript"
    );

    let summary = if args.streaming {
        analyze_streaming(&parser, &analyzer, args)?
    } else {
        let transcript = parser.parse(&args.input)?;
        let stats = transcript.stats();
        if stats.dropped() > 0 {
            tracing::warn!(
                malformed = stats.malformed_lines,
                unrecognized = stats.unrecognized_timestamps,
                "some lines could not be parsed"
            );
        }
        analyzer.analyze(transcript.messages())
    };

    tracing::info!(
        messages = summary.total_messages,
        participants = summary.participants.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "analysis complete"
    );

    emit(&summary, args)
}

fn analyze_streaming(
    parser: &TranscriptParser,
    analyzer: &Analyzer,
    args: &Args,
) -> Result<ChatSummary, ChatstatError> {
    let file = File::open(&args.input)?;
    let reader = BufReader::with_capacity(parser.config().buffer_size, file);
    analyzer.analyze_reader(parser, reader)
}

fn emit(summary: &ChatSummary, args: &Args) -> Result<(), ChatstatError> {
    let format = OutputFormat::from(args.format);
    match &args.output {
        Some(path) => {
            write_to_format(summary, path, format, args.pretty)?;
            tracing::info!(output = %path.display(), %format, "summary written");
        }
        None => {
            let rendered = to_format_string(summary, format, args.pretty)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
