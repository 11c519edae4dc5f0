//! Criterion benchmarks for rust_context_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_context_logger::id::{IdentifierSource, UuidSource};
use rust_context_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn sink_backend(level: LogLevel, format: OutputFormat) -> Logger {
    Logger::builder()
        .min_level(level)
        .output_format(format)
        .appender(WriterAppender::new(std::io::sink()))
        .build()
}

fn request_event() -> EventRecord {
    EventRecord::new()
        .with_field("tag", "http")
        .with_field("message", "request served")
        .with_field("duration", 4.902)
        .with_field("request_ip", "36.71.235.223")
        .with_field("request_uri", "https://example.com/users/1234")
        .with_field("request_pattern", "users/:id")
        .with_field("response_code", 200)
        .with_field("response_bytes", 1234)
        .with_field("user_id", 1234)
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("uuid_generate", |b| {
        b.iter(|| black_box(UuidSource.generate()));
    });

    group.bench_function("request_logger_new", |b| {
        b.iter(|| black_box(RequestLogger::new()));
    });

    group.bench_function("request_logger_with_id", |b| {
        b.iter(|| black_box(RequestLogger::with_request_id(black_box("abc-123"))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_request_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_logging");
    group.throughput(Throughput::Elements(1));

    let event = request_event();

    let json = RequestLogger::with_request_id("bench")
        .with_backend(sink_backend(LogLevel::Info, OutputFormat::Json));
    group.bench_function("info_json", |b| {
        b.iter(|| json.info(black_box(&event)));
    });

    let text = RequestLogger::with_request_id("bench")
        .with_backend(sink_backend(LogLevel::Info, OutputFormat::Text));
    group.bench_function("info_text", |b| {
        b.iter(|| text.info(black_box(&event)));
    });

    group.bench_function("debug_filtered", |b| {
        b.iter(|| json.debug(black_box(&event)));
    });

    group.bench_function("field_mapping", |b| {
        b.iter(|| black_box(json.fields(black_box(&event))));
    });

    group.finish();
}

fn bench_actor_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("actor_logging");
    group.throughput(Throughput::Elements(1));

    let logger = ActorLogger::with_request_id("bench", Some("u1".into()))
        .with_backend(sink_backend(LogLevel::Info, OutputFormat::Json));

    group.bench_function("info_str", |b| {
        b.iter(|| logger.info("bench", black_box("simple message")));
    });

    group.bench_function("info_operands", |b| {
        b.iter(|| {
            logger.info(
                "bench",
                MessageArgs::new().with("retry ").with(3).with(4).with(" left"),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Arc::new(
                RequestLogger::with_request_id("bench")
                    .with_backend(sink_backend(LogLevel::Info, OutputFormat::Json)),
            );
            let event = Arc::new(request_event());

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        let event = Arc::clone(&event);
                        thread::spawn(move || {
                            for _ in 0..100 {
                                logger.info(&event);
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_request_logging,
    bench_actor_logging,
    bench_concurrent_logging
);
criterion_main!(benches);
