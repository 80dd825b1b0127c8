//! File logging example
//!
//! Demonstrates logging to console and a splitting file provider simultaneously.
//!
//! Run with: cargo run --example file_logging

use rust_log_router::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Router - File Logging Example ===\n");

    let options = FileProviderOptions::new()
        .with_min_level(LogLevel::Info)
        .with_split(FileSplit::Messages { max_messages: 5 });
    let file = Arc::new(FileProvider::new("logs", options)?);

    let factory = LoggerFactory::builder()
        .provider(Arc::new(ConsoleProvider::stdout()))
        .provider(file.clone())
        .build();

    let logger = factory.create_logger("app");

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (console only)");
    logger.info("Configuration loaded successfully");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warning("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");

    println!("\n=== Example completed successfully! ===");
    println!(
        "Check '{}' for the split log files (latest: {})",
        file.directory().display(),
        file.current_file().display()
    );

    Ok(())
}
