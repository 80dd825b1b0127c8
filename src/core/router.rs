//! Per-category router
//!
//! A [`Router`] is what application code logs through. It holds one
//! [`Binding`] per provider and forwards each message to every binding whose
//! rule and sink accept the level.

use super::{
    error::LoggerError,
    log_level::LogLevel,
    metrics::RouterMetrics,
    properties::Properties,
    rule::Rule,
    sink::{Provider, Sink},
};
use parking_lot::RwLock;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A provider, the sink it produced for one category, and the selected rule.
#[derive(Clone)]
pub struct Binding {
    provider: Arc<dyn Provider>,
    sink: Arc<dyn Sink>,
    rule: Arc<Rule>,
}

impl Binding {
    pub fn new(provider: Arc<dyn Provider>, sink: Arc<dyn Sink>, rule: Arc<Rule>) -> Self {
        Self {
            provider,
            sink,
            rule,
        }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    /// Rule floor, rule predicate, then the sink's own threshold
    fn is_enabled(&self, level: LogLevel, category: &str) -> bool {
        self.rule.allows(self.provider.name(), category, level) && self.sink.is_enabled(level)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("provider", &self.provider.name())
            .field("rule", &self.rule)
            .finish()
    }
}

/// Fan-out logger bound to one category.
///
/// Obtained from [`LoggerFactory::create_logger`](super::LoggerFactory::create_logger);
/// the same category always yields the same `Arc<Router>`.
///
/// Logging works on a snapshot of the binding list taken under a short read
/// lock, so sinks may call back into the factory without deadlocking.
pub struct Router {
    category: String,
    bindings: RwLock<Arc<[Binding]>>,
    metrics: RouterMetrics,
}

/// Result of one binding's step in the fan-out
enum Dispatch {
    Delivered,
    Filtered,
}

impl Router {
    pub fn new(category: impl Into<String>, bindings: Vec<Binding>) -> Self {
        Self {
            category: category.into(),
            bindings: RwLock::new(bindings.into()),
            metrics: RouterMetrics::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.read().len()
    }

    /// Append a binding, e.g. for a provider registered after this router was built
    pub fn add_binding(&self, binding: Binding) {
        let mut bindings = self.bindings.write();
        let mut extended = bindings.to_vec();
        extended.push(binding);
        *bindings = extended.into();
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    fn snapshot(&self) -> Arc<[Binding]> {
        Arc::clone(&self.bindings.read())
    }

    /// True if at least one binding would accept a message at `level`.
    ///
    /// A binding whose rule predicate or sink threshold panics counts as disabled.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.snapshot().iter().any(|binding| {
            panic::catch_unwind(AssertUnwindSafe(|| binding.is_enabled(level, &self.category)))
                .unwrap_or(false)
        })
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_with_properties(level, message, &Properties::new());
    }

    /// Forward a message to every enabled sink.
    ///
    /// **Per-Binding Failure Isolation**: the enablement check and the sink
    /// call of each binding run inside their own `catch_unwind`, so an error
    /// or panic from one rule predicate or sink is discarded and the remaining
    /// sinks still receive the message. Nothing is ever surfaced to the caller.
    pub fn log_with_properties(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        properties: &Properties,
    ) {
        let message = message.as_ref();

        for binding in self.snapshot().iter() {
            match self.dispatch(binding, level, message, properties) {
                Ok(Dispatch::Delivered) => {
                    self.metrics.record_delivered();
                }
                Ok(Dispatch::Filtered) => {
                    self.metrics.record_filtered();
                }
                Err(_) => {
                    self.metrics.record_failure();
                }
            }
        }
    }

    fn dispatch(
        &self,
        binding: &Binding,
        level: LogLevel,
        message: &str,
        properties: &Properties,
    ) -> Result<Dispatch, LoggerError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            if !binding.is_enabled(level, &self.category) {
                return Ok(Dispatch::Filtered);
            }
            binding
                .sink
                .log(level, message, properties)
                .map(|()| Dispatch::Delivered)
        }));

        match result {
            Ok(outcome) => outcome,
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(LoggerError::sink_panicked(binding.provider.name(), panic_msg))
            }
        }
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("category", &self.category)
            .field("bindings", &self.snapshot())
            .finish()
    }
}
