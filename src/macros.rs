//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and forward the result
//! to a [`Router`](crate::Router).
//!
//! # Examples
//!
//! ```
//! use rust_log_router::prelude::*;
//! use rust_log_router::info;
//!
//! let factory = LoggerFactory::new();
//! let logger = factory.create_logger("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// Formatting is skipped when no binding of the router accepts `level`.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let factory = LoggerFactory::new();
/// # let logger = factory.create_logger("app");
/// use rust_log_router::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level = $level;
        if $logger.is_enabled(level) {
            $logger.log(level, format!($($arg)+))
        }
    }};
}

/// Log a formatted message together with a set of properties.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let factory = LoggerFactory::new();
/// # let logger = factory.create_logger("http");
/// use rust_log_router::log_with;
/// let props = Properties::new().with("status", 404);
/// log_with!(logger, LogLevel::Warning, &props, "Not found: {}", "/missing");
/// ```
#[macro_export]
macro_rules! log_with {
    ($logger:expr, $level:expr, $props:expr, $($arg:tt)+) => {{
        let level = $level;
        if $logger.is_enabled(level) {
            $logger.log_with_properties(level, format!($($arg)+), $props)
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let factory = LoggerFactory::new();
/// # let logger = factory.create_logger("app");
/// use rust_log_router::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let factory = LoggerFactory::new();
/// # let logger = factory.create_logger("app");
/// use rust_log_router::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LoggerFactory, Properties};
    use crate::providers::MemoryProvider;
    use std::sync::Arc;

    fn setup(min_level: LogLevel) -> (Arc<MemoryProvider>, LoggerFactory) {
        let memory = Arc::new(MemoryProvider::new(32).unwrap());
        let factory = LoggerFactory::builder()
            .provider(memory.clone())
            .min_level(min_level)
            .build();
        (memory, factory)
    }

    #[test]
    fn test_log_macro() {
        let (memory, factory) = setup(LogLevel::Trace);
        let logger = factory.create_logger("macros");

        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        assert_eq!(
            memory.drain(),
            vec!["[Info] macros: Test message\n", "[Info] macros: Formatted: 42\n"]
        );
    }

    #[test]
    fn test_level_macros() {
        let (memory, factory) = setup(LogLevel::Trace);
        let logger = factory.create_logger("m");

        trace!(logger, "t {}", 1);
        debug!(logger, "d");
        info!(logger, "i");
        warning!(logger, "w");
        error!(logger, "e {}", "x");
        critical!(logger, "c");

        let lines = memory.drain();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "[Trace] m: t 1\n");
        assert_eq!(lines[3], "[Warning] m: w\n");
        assert_eq!(lines[5], "[Critical] m: c\n");
    }

    #[test]
    fn test_disabled_level_skips_formatting() {
        let (memory, factory) = setup(LogLevel::Error);
        let logger = factory.create_logger("m");

        struct Loud;
        impl std::fmt::Display for Loud {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("formatted a disabled message");
            }
        }

        debug!(logger, "{}", Loud);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_log_with_macro() {
        let (memory, factory) = setup(LogLevel::Trace);
        let logger = factory.create_logger("http");
        let props = Properties::new().with("status", 404);

        log_with!(logger, LogLevel::Warning, &props, "Not found: {}", "/x");

        assert_eq!(
            memory.drain(),
            vec!["[Warning] http: Not found: /x\n\tstatus: 404\n"]
        );
    }
}
