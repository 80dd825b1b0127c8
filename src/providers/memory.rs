//! In-memory ring buffer provider
//!
//! Keeps the most recent formatted lines from all of its sinks in one bounded
//! buffer. Useful for tests and for surfacing recent history in diagnostics.

use crate::core::{
    LogLevel, LogRecord, LoggerError, OutputFormat, Properties, Provider, Result, Sink, SinkCache,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct RingBuffer {
    capacity: usize,
    lines: VecDeque<String>,
}

impl RingBuffer {
    fn push(&mut self, line: String) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }
}

/// Bounded, drainable in-memory provider.
///
/// # Example
///
/// ```
/// use rust_log_router::providers::MemoryProvider;
/// use rust_log_router::{LogLevel, Properties, Provider};
///
/// let provider = MemoryProvider::new(2).unwrap();
/// let sink = provider.get_logger("app");
/// for i in 0..3 {
///     sink.log(LogLevel::Info, &format!("m{}", i), &Properties::new()).unwrap();
/// }
///
/// assert_eq!(provider.drain(), vec!["[Info] app: m1\n", "[Info] app: m2\n"]);
/// assert!(provider.drain().is_empty());
/// ```
pub struct MemoryProvider {
    buffer: Arc<Mutex<RingBuffer>>,
    min_level: LogLevel,
    output_format: OutputFormat,
    sinks: SinkCache,
}

impl MemoryProvider {
    pub const NAME: &'static str = "MemoryProvider";

    /// Create a provider keeping at most `capacity` lines
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_min_level(capacity, LogLevel::Trace)
    }

    /// Create a provider keeping at most `capacity` lines at or above `min_level`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `capacity` is zero
    pub fn with_min_level(capacity: usize, min_level: LogLevel) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config(
                Self::NAME,
                "capacity must be greater than zero",
            ));
        }

        Ok(Self {
            buffer: Arc::new(Mutex::new(RingBuffer {
                capacity,
                lines: VecDeque::with_capacity(capacity),
            })),
            min_level,
            output_format: OutputFormat::default(),
            sinks: SinkCache::new(),
        })
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Take every buffered line, oldest first, leaving the buffer empty
    pub fn drain(&self) -> Vec<String> {
        self.buffer.lock().lines.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
        self.sinks.get_or_create(category, || {
            Arc::new(MemorySink {
                category: category.to_string(),
                buffer: Arc::clone(&self.buffer),
                min_level: self.min_level,
                output_format: self.output_format,
            })
        })
    }
}

struct MemorySink {
    category: String,
    buffer: Arc<Mutex<RingBuffer>>,
    min_level: LogLevel,
    output_format: OutputFormat,
}

impl Sink for MemorySink {
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let record = LogRecord::new(level, &self.category, message).with_properties(properties);
        let line = self.output_format.format(&record);
        self.buffer.lock().push(line);
        Ok(())
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}
