//! Actor logging example
//!
//! Tags free-form messages with a request id, a caller-chosen tag and the
//! acting user once it is known.
//!
//! Run with: cargo run --example actor_logging

use rust_context_logger::prelude::*;
use rust_context_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Actor Logging Example ===\n");

    let backend = Logger::builder()
        .min_level(LogLevel::Debug)
        .output_format(OutputFormat::Text)
        .appender(ConsoleAppender::stdout().with_colors(true))
        .build();

    // 1. Anonymous until login
    println!("1. Session before and after login:");
    let mut logger = ActorLogger::new(None)?.with_backend(backend);
    logger.info("LOGIN", "login attempt");
    logger.set_actor_id("u9");
    logger.info("LOGIN", "login succeeded");

    // 2. Several operands
    println!("\n2. Messages built from several operands:");
    info!(logger, "CART", "items in cart: ", 3);
    warn!(logger, "CART", "retry ", 1, 2, " of 3");
    logger.debug("CART", MessageArgs::from("total ").with(42.5));

    // 3. Same request id as the request that started the work
    println!("\n3. Continuing a request:");
    let request = RequestLogger::with_request_id("abc-123");
    let worker = ActorLogger::from_request(&request, Some("u9".into()));
    worker.info("JOB", "background job picked up the request");

    logger.clear_actor_id();
    logger.info("LOGOUT", "session closed");

    logger.backend().flush()?;
    println!("\n=== Example completed ===");
    Ok(())
}
