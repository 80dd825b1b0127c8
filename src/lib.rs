//! # Rust Log Router
//!
//! A structured logging facade. Application code logs through a per-category
//! [`Router`]; a [`LoggerFactory`] decides, with an ordered list of [`Rule`]s,
//! which [`Provider`]s receive each message and at what minimum level.
//!
//! ## Features
//!
//! - **Rule-based routing**: first matching rule per provider and category prefix
//! - **Fan-out with isolation**: a failing or panicking sink never blocks the others
//! - **Late providers**: providers added after loggers exist are bound into them
//! - **Built-in providers**: console, file with splitting, memory ring buffer, syslog
//!
//! ## Example
//!
//! ```
//! use rust_log_router::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryProvider::new(64).unwrap());
//! let factory = LoggerFactory::builder()
//!     .provider(memory.clone())
//!     .min_level(LogLevel::Warning)
//!     .rule(Rule::new().category("db").min_level(LogLevel::Debug))
//!     .build();
//!
//! factory.create_logger("db.pool").debug("connection opened");
//! factory.create_logger("http").info("request served");
//!
//! assert_eq!(memory.drain(), vec!["[Debug] db.pool: connection opened\n"]);
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod providers;

pub mod prelude {
    pub use crate::core::{
        Binding, LogLevel, LogRecord, LoggerError, LoggerFactory, LoggerFactoryBuilder,
        OutputFormat, Properties, Provider, Result, Router, RouterMetrics, RouterOptions, Rule,
        Sink, SinkCache,
    };
    pub use crate::providers::{ConsoleProvider, MemoryProvider};

    #[cfg(feature = "file")]
    pub use crate::providers::{FileProvider, FileProviderOptions, FileSplit};
}

pub use crate::core::{
    Binding, LogLevel, LogRecord, LoggerError, LoggerFactory, LoggerFactoryBuilder, OutputFormat,
    Properties, Provider, Result, Router, RouterMetrics, RouterOptions, Rule, RuleFilter, Sink,
    SinkCache,
};
pub use global::GlobalFactory;
pub use providers::{ConsoleProvider, MemoryProvider};
