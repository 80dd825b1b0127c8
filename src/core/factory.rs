//! Logger factory: provider registry, rule resolution and router cache

use super::{
    log_level::LogLevel,
    options::{RouterOptions, RuleSet},
    router::{Binding, Router},
    rule::Rule,
    sink::Provider,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct FactoryState {
    providers: Vec<Arc<dyn Provider>>,
    routers: HashMap<String, Arc<Router>>,
}

/// Owns the providers and rules and hands out one [`Router`] per category.
///
/// Both the provider list and the category map sit behind a single lock, so
/// `create_logger` and `add_provider` are serialized against each other while
/// logging through an existing router never touches the factory.
///
/// # Example
///
/// ```
/// use rust_log_router::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryProvider::new(16).unwrap());
/// let factory = LoggerFactory::builder()
///     .provider(memory.clone())
///     .min_level(LogLevel::Info)
///     .build();
///
/// let logger = factory.create_logger("app");
/// logger.debug("filtered out");
/// logger.info("kept");
///
/// assert_eq!(memory.drain().len(), 1);
/// ```
pub struct LoggerFactory {
    rules: RuleSet,
    state: Mutex<FactoryState>,
}

impl LoggerFactory {
    /// Factory with no providers and a single catch-all rule at `Trace`
    #[must_use]
    pub fn new() -> Self {
        Self::with_providers(Vec::new(), RouterOptions::default())
    }

    /// Factory with an initial provider list and options
    ///
    /// A default rule carrying `options.default_min_level` is appended when the
    /// options do not already contain one.
    #[must_use]
    pub fn with_providers(providers: Vec<Arc<dyn Provider>>, options: RouterOptions) -> Self {
        Self {
            rules: options.into_rule_set(),
            state: Mutex::new(FactoryState {
                providers,
                routers: HashMap::new(),
            }),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerFactoryBuilder {
        LoggerFactoryBuilder::new()
    }

    /// Rule selected for `(provider, category)`: the first declared match
    pub fn apply_filters(&self, provider: &str, category: &str) -> Arc<Rule> {
        self.rules.select(provider, category)
    }

    /// Return the router for `category`, building and caching it on first use
    pub fn create_logger(&self, category: &str) -> Arc<Router> {
        let mut state = self.state.lock();
        if let Some(router) = state.routers.get(category) {
            return Arc::clone(router);
        }

        let bindings = state
            .providers
            .iter()
            .map(|provider| self.bind(provider, category))
            .collect();

        let router = Arc::new(Router::new(category, bindings));
        state
            .routers
            .insert(category.to_string(), Arc::clone(&router));
        router
    }

    /// Register a provider and bind it into every router created so far
    pub fn add_provider(&self, provider: Arc<dyn Provider>) -> &Self {
        let mut state = self.state.lock();

        for (category, router) in state.routers.iter() {
            router.add_binding(self.bind(&provider, category));
        }
        state.providers.push(provider);

        self
    }

    pub fn provider_count(&self) -> usize {
        self.state.lock().providers.len()
    }

    /// Number of distinct categories requested so far
    pub fn logger_count(&self) -> usize {
        self.state.lock().routers.len()
    }

    fn bind(&self, provider: &Arc<dyn Provider>, category: &str) -> Binding {
        let rule = self.apply_filters(provider.name(), category);
        Binding::new(Arc::clone(provider), provider.get_logger(category), rule)
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LoggerFactory")
            .field("rules", &self.rules)
            .field(
                "providers",
                &state.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("categories", &state.routers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a [`LoggerFactory`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_router::prelude::*;
/// use std::sync::Arc;
///
/// let factory = LoggerFactory::builder()
///     .provider(Arc::new(ConsoleProvider::stdout()))
///     .min_level(LogLevel::Critical)
///     .rule(Rule::new().category("net").min_level(LogLevel::Warning))
///     .build();
///
/// assert!(factory.create_logger("net.http").is_enabled(LogLevel::Warning));
/// assert!(!factory.create_logger("db").is_enabled(LogLevel::Warning));
/// ```
pub struct LoggerFactoryBuilder {
    providers: Vec<Arc<dyn Provider>>,
    options: RouterOptions,
}

impl LoggerFactoryBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            options: RouterOptions::default(),
        }
    }

    /// Add a provider
    #[must_use = "builder methods return a new value"]
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Level floor of the implicit default rule
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.options.default_min_level = level;
        self
    }

    /// Append a rule; order is significant
    #[must_use = "builder methods return a new value"]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.options.rules.push(rule);
        self
    }

    /// Replace the options wholesale
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> LoggerFactory {
        LoggerFactory::with_providers(self.providers, self.options)
    }
}

impl Default for LoggerFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::properties::Properties;
    use crate::core::sink::{Sink, SinkCache};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        hits: AtomicUsize,
    }

    impl Sink for CountingSink {
        fn log(&self, _level: LogLevel, _message: &str, _properties: &Properties) -> Result<()> {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn is_enabled(&self, _level: LogLevel) -> bool {
            true
        }
    }

    struct CountingProvider {
        name: &'static str,
        sinks: SinkCache,
        created: AtomicUsize,
    }

    impl CountingProvider {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                sinks: SinkCache::new(),
                created: AtomicUsize::new(0),
            })
        }
    }

    impl Provider for CountingProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
            self.sinks.get_or_create(category, || {
                self.created.fetch_add(1, Ordering::Relaxed);
                Arc::new(CountingSink {
                    hits: AtomicUsize::new(0),
                })
            })
        }
    }

    #[test]
    fn test_create_logger_is_cached() {
        let provider = CountingProvider::new("counting");
        let factory = LoggerFactory::builder().provider(provider.clone()).build();

        let a = factory.create_logger("a");
        let a_again = factory.create_logger("a");
        let b = factory.create_logger("b");

        assert!(Arc::ptr_eq(&a, &a_again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(factory.logger_count(), 2);
        assert_eq!(provider.created.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_default_factory_has_no_providers() {
        let factory = LoggerFactory::default();
        let logger = factory.create_logger("test");

        assert_eq!(factory.provider_count(), 0);
        assert_eq!(logger.binding_count(), 0);
        assert!(!logger.is_enabled(LogLevel::Debug));
    }

    #[test]
    fn test_add_provider_binds_existing_routers() {
        let factory = LoggerFactory::new();
        let a = factory.create_logger("a");
        let b = factory.create_logger("b");

        factory
            .add_provider(CountingProvider::new("first"))
            .add_provider(CountingProvider::new("second"));

        assert_eq!(a.binding_count(), 2);
        assert_eq!(b.binding_count(), 2);
        assert_eq!(factory.create_logger("c").binding_count(), 2);
    }

    #[test]
    fn test_apply_filters_by_provider() {
        let factory = LoggerFactory::builder()
            .min_level(LogLevel::Critical)
            .rule(Rule::new().provider("first").min_level(LogLevel::Debug))
            .build();

        assert_eq!(
            factory.apply_filters("first", "any").min_level,
            Some(LogLevel::Debug)
        );
        assert_eq!(
            factory.apply_filters("second", "any").min_level,
            Some(LogLevel::Critical)
        );
    }

    #[test]
    fn test_bindings_share_rule_instances() {
        let factory = LoggerFactory::builder()
            .provider(CountingProvider::new("p"))
            .build();

        let first = factory.apply_filters("p", "x");
        let second = factory.apply_filters("p", "y");
        assert!(Arc::ptr_eq(&first, &second));
    }
}
