//! Sink and provider traits for log output destinations

use super::{error::Result, log_level::LogLevel, properties::Properties};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Concrete consumer of messages for one category.
pub trait Sink: Send + Sync {
    /// Format and write one message. May fail; the router absorbs failures.
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()>;

    /// Whether this sink accepts messages at `level`
    fn is_enabled(&self, level: LogLevel) -> bool;
}

/// Named factory of sinks, one per category.
///
/// `get_logger` must be idempotent: the same category yields the same sink.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    fn get_logger(&self, category: &str) -> Arc<dyn Sink>;
}

/// Per-provider category -> sink cache.
pub struct SinkCache {
    sinks: Mutex<HashMap<String, Arc<dyn Sink>>>,
}

impl SinkCache {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached sink for `category`, creating it with `make` on first use
    pub fn get_or_create<F>(&self, category: &str, make: F) -> Arc<dyn Sink>
    where
        F: FnOnce() -> Arc<dyn Sink>,
    {
        let mut sinks = self.sinks.lock();
        if let Some(sink) = sinks.get(category) {
            return Arc::clone(sink);
        }

        let sink = make();
        sinks.insert(category.to_string(), Arc::clone(&sink));
        sink
    }

    pub fn len(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.lock().is_empty()
    }
}

impl Default for SinkCache {
    fn default() -> Self {
        Self::new()
    }
}
