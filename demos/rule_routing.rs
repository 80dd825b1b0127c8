//! Rule routing example
//!
//! Shows first-match rule selection, per-provider rules, category prefixes and
//! a provider registered after loggers already exist.
//!
//! Run with: cargo run --example rule_routing

use rust_log_router::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Router - Rule Routing Example ===\n");

    let audit = Arc::new(MemoryProvider::new(100)?);

    let factory = LoggerFactory::builder()
        .provider(Arc::new(ConsoleProvider::stdout()))
        .min_level(LogLevel::Warning)
        // Most specific rules first: the first match wins
        .rule(Rule::new().category("db.migrations").min_level(LogLevel::Trace))
        .rule(Rule::new().category("db").min_level(LogLevel::Info))
        .rule(Rule::new().provider(MemoryProvider::NAME).min_level(LogLevel::Error))
        .build();

    let migrations = factory.create_logger("db.migrations");
    let pool = factory.create_logger("db.pool");
    let http = factory.create_logger("http");

    println!("1. Console output filtered per category:");
    migrations.trace("applying 0042_add_index (visible)");
    pool.debug("connection checked out (hidden)");
    pool.info("pool resized to 16 (visible)");
    http.info("GET /health (hidden)");
    http.warning("slow response (visible)");

    println!("\n2. Registering an audit provider on existing loggers:");
    factory.add_provider(audit.clone());
    http.warning("not audited, below the audit rule");
    http.error("upstream timeout (audited)");
    pool.critical("pool exhausted (audited)");

    for line in audit.drain() {
        print!("   audit> {}", line);
    }

    println!("\n3. Router metrics for 'http':");
    let metrics = http.metrics();
    println!(
        "   delivered={} filtered={} failures={}",
        metrics.delivered(),
        metrics.filtered(),
        metrics.sink_failures()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
