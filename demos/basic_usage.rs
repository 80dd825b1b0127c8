//! Basic router usage example
//!
//! Demonstrates a factory with a console provider and logging at every level.
//!
//! Run with: cargo run --example basic_usage

use rust_log_router::prelude::*;
use rust_log_router::{info, warning};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Router - Basic Usage Example ===\n");

    let factory = LoggerFactory::builder()
        .provider(Arc::new(ConsoleProvider::stdout()))
        .build();

    let logger = factory.create_logger("basic");

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Formatting macros and properties:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    let props = Properties::new().with("retry", 3).with("host", "db.local");
    logger.log_with_properties(LogLevel::Warning, "Connection slow", &props);
    warning!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n3. A stricter factory (Info and above):");
    let strict = LoggerFactory::builder()
        .provider(Arc::new(ConsoleProvider::stdout()))
        .min_level(LogLevel::Info)
        .build();
    let logger = strict.create_logger("strict");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
