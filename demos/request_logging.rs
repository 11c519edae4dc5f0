//! Request logging example
//!
//! Binds one request id per inbound request and logs HTTP metadata as a
//! fixed set of JSON fields.
//!
//! Run with: cargo run --example request_logging

use rust_context_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Request Logging Example ===\n");

    // 1. Generated request id, default backend (JSON on stderr, Info and above)
    println!("1. Logging a served request:");
    let logger = RequestLogger::new()?;
    println!("   request id: {}", logger.request_id());

    logger.info(
        &EventRecord::new()
            .with_field("tag", "http")
            .with_field("message", "request served")
            .with_field("duration", 4.902)
            .with_field("request_ip", "36.71.235.223")
            .with_field("request_uri", "https://example.com/users/1234")
            .with_field("request_pattern", "users/:id")
            .with_field("response_code", 200)
            .with_field("response_bytes", 1234)
            .with_field("user_id", 1234),
    );

    // 2. Upstream request id, records parsed from JSON
    println!("\n2. Continuing an upstream request:");
    let logger = RequestLogger::with_request_id("abc-123");
    let event = EventRecord::from_json(r#"{"tag":"t1","message":"oops","response_code":500}"#)?;
    logger.warn(&event);

    // 3. Backend built from LOG_LEVEL / LOG_FORMAT
    println!("\n3. Backend from the environment:");
    let config = LoggerConfig::from_env()?;
    println!("   level={} format={}", config.level, config.format.name());
    let logger = RequestLogger::new()?.with_backend(Logger::from_config(&config)?);
    logger.debug(&EventRecord::new().with_field("message", "only shown with LOG_LEVEL=debug"));

    // 4. One logger shared by worker threads
    println!("\n4. Shared across threads:");
    let logger = Arc::new(RequestLogger::new()?);
    let handles: Vec<_> = (0..3)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                logger.info(
                    &EventRecord::new()
                        .with_field("tag", format!("worker-{}", worker))
                        .with_field("message", "step done"),
                );
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    logger.backend().flush()?;
    println!("\n=== Example completed ===");
    Ok(())
}
