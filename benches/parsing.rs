//! Benchmarks for chatstat parsing and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- aggregate`

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstat::core::output::{to_csv, to_json};
use chatstat::core::{Analyzer, LexiconScorer, SentimentScorer};
use chatstat::parser::TranscriptParser;
use chatstat::parsing::{classify_line, normalize_timestamp};
use chatstat::config::DateOrder;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + count / 10);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let day = (i / 1440) % 28 + 1;
        let hour = (i / 60) % 12 + 1;
        let minute = i % 60;
        let body = match i % 5 {
            0 => format!("good morning #{} 🙂", i),
            1 => format!("check https://example.com/{}", i),
            2 => "not bad at all".to_string(),
            3 => format!("message number {}", i),
            _ => "I hate mondays".to_string(),
        };
        lines.push(format!("1/{}/24, {}:{:02} PM - {}: {}", day, hour, minute, sender, body));
        if i % 10 == 0 {
            lines.push("and a second line".to_string());
        }
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");
    let parser = TranscriptParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let transcript = parser.parse_str(black_box(txt)).unwrap();
                black_box(transcript)
            });
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    let parser = TranscriptParser::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Bytes(txt.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let count = parser
                    .stream(Cursor::new(black_box(txt.as_bytes())))
                    .filter(|m| m.is_ok())
                    .count();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_line_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_primitives");
    let header = "1/2/23, 9:00 AM - Alice: hello there";
    let system = "1/2/23, 9:01 AM - Bob left the group";

    group.bench_function("classify_header", |b| {
        b.iter(|| black_box(classify_line(black_box(header), true, true)));
    });
    group.bench_function("classify_system", |b| {
        b.iter(|| black_box(classify_line(black_box(system), true, true)));
    });
    group.bench_function("normalize_timestamp", |b| {
        b.iter(|| {
            black_box(normalize_timestamp(
                black_box("03/04/25"),
                Some(black_box("9:00 PM")),
                DateOrder::DayFirst,
            ))
        });
    });
    group.bench_function("lexicon_score", |b| {
        let scorer = LexiconScorer::new();
        b.iter(|| black_box(scorer.score(black_box("this is not very good but I love it"))));
    });
    group.finish();
}

// =============================================================================
// Aggregation Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let analyzer = Analyzer::new();

    for size in [1_000_usize, 10_000, 100_000] {
        let transcript = TranscriptParser::new()
            .parse_str(&generate_transcript(size))
            .unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &transcript,
            |b, transcript| {
                b.iter(|| black_box(analyzer.analyze(black_box(transcript.messages()))));
            },
        );
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = TranscriptParser::new();
    let analyzer = Analyzer::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // parse + aggregate in one pass, then render both outputs
                let summary = analyzer
                    .analyze_reader(&parser, Cursor::new(black_box(txt.as_bytes())))
                    .unwrap();
                let json = to_json(&summary, false).unwrap();
                let csv = to_csv(&summary).unwrap();
                black_box((json, csv))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parse_str,
    bench_stream,
    bench_line_primitives,
    bench_aggregate,
    bench_full_pipeline,
);

criterion_main!(benches);
