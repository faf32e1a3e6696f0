//! Criterion benchmarks for scoped_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scoped_logger::core::timestamp::fixed;
use scoped_logger::prelude::*;
use scoped_logger::{label_to_rank, meta, rank_to_label};
use std::sync::Arc;

fn memory_logger(min_level: &str, format: OutputFormat) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder("bench")
        .min_level(min_level)
        .timestamp(fixed("2025-01-08 10:30:45"))
        .output_format(format)
        .shared_sink(sink.clone())
        .build()
        .unwrap();
    (logger, sink)
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("defaults", |b| {
        b.iter(|| {
            let logger = get_logger(black_box("bench"), None).unwrap();
            black_box(logger)
        });
    });

    group.bench_function("with_options", |b| {
        b.iter(|| {
            let options = LoggerOptions::new()
                .min_level(black_box("debug"))
                .message_key("message")
                .base(meta! { "service" => "bench" });
            let logger = get_logger("bench", options).unwrap();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Level Registry Benchmarks
// ============================================================================

fn bench_level_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_registry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("label_to_rank", |b| {
        b.iter(|| black_box(label_to_rank(black_box("Critical"))))
    });

    group.bench_function("rank_to_label", |b| {
        b.iter(|| black_box(rank_to_label(black_box(60))))
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let (logger, sink) = memory_logger("warn", OutputFormat::Json);

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("This should be filtered"));
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(black_box("This should be logged"));
            sink.take();
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("formats");
    group.throughput(Throughput::Elements(1));

    for (name, format) in [
        ("json", OutputFormat::Json),
        ("text", OutputFormat::Text),
        ("logfmt", OutputFormat::Logfmt),
    ] {
        let (logger, sink) = memory_logger("info", format);
        group.bench_function(name, |b| {
            b.iter(|| {
                logger.info_with(
                    black_box("request handled"),
                    meta! { "path" => "/users", "status" => 200, "latency_ms" => 12.5 },
                );
                sink.take();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let (logger, sink) = memory_logger("info", OutputFormat::Json);
    let logger = Arc::new(logger);

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
            sink.take();
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_level_registry,
    bench_level_filtering,
    bench_formats,
    bench_concurrent_logging
);

criterion_main!(benches);
