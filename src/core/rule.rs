//! Declarative routing rules
//!
//! A [`Rule`] decides whether a provider participates for a category and at
//! which minimum level. Rules are matched in declaration order by provider
//! name and category prefix; the first match wins. The optional level floor
//! and predicate are evaluated for every message.

use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

/// Custom predicate receiving `(provider_name, category, level)`.
pub type RuleFilter = Arc<dyn Fn(&str, &str, LogLevel) -> bool + Send + Sync>;

/// Filter governing a provider's participation for a category.
///
/// A rule with every field unset matches everything and imposes no floor.
///
/// # Example
///
/// ```
/// use rust_log_router::{LogLevel, Rule};
///
/// let rule = Rule::new()
///     .provider("ConsoleProvider")
///     .category("net.")
///     .min_level(LogLevel::Warning);
///
/// assert!(rule.matches("ConsoleProvider", "net.http"));
/// assert!(!rule.matches("MemoryProvider", "net.http"));
/// ```
#[derive(Clone, Default)]
pub struct Rule {
    pub provider_name: Option<String>,
    pub category_prefix: Option<String>,
    pub min_level: Option<LogLevel>,
    pub filter: Option<RuleFilter>,
}

impl Rule {
    /// Create a catch-all rule
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the rule to one provider name (exact match)
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Restrict the rule to categories starting with `prefix`
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn category(mut self, prefix: impl Into<String>) -> Self {
        self.category_prefix = Some(prefix.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Attach a predicate evaluated for each message
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &str, LogLevel) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// True when neither provider nor category is constrained
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.provider_name.is_none() && self.category_prefix.is_none()
    }

    /// Bind-time match on provider name and category prefix
    #[must_use]
    pub fn matches(&self, provider: &str, category: &str) -> bool {
        if let Some(ref name) = self.provider_name {
            if name != provider {
                return false;
            }
        }

        if let Some(ref prefix) = self.category_prefix {
            if !category.starts_with(prefix.as_str()) {
                return false;
            }
        }

        true
    }

    /// Log-time check: level floor, then predicate
    #[must_use]
    pub fn allows(&self, provider: &str, category: &str, level: LogLevel) -> bool {
        if let Some(min) = self.min_level {
            if level < min {
                return false;
            }
        }

        match self.filter {
            Some(ref filter) => filter(provider, category, level),
            None => true,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("provider_name", &self.provider_name)
            .field("category_prefix", &self.category_prefix)
            .field("min_level", &self.min_level)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rule_matches_everything() {
        let rule = Rule::new();
        assert!(rule.is_default());
        assert!(rule.matches("AnyProvider", "any.category"));
        assert!(rule.matches("", ""));
        for level in LogLevel::ALL {
            assert!(rule.allows("AnyProvider", "any.category", level));
        }
    }

    #[test]
    fn test_provider_exact_match() {
        let rule = Rule::new().provider("MemoryProvider");
        assert!(rule.matches("MemoryProvider", "x"));
        assert!(!rule.matches("MemoryProviderX", "x"));
        assert!(!rule.is_default());
    }

    #[test]
    fn test_category_is_prefix_match() {
        let rule = Rule::new().category("Category1");
        assert!(rule.matches("p", "Category1"));
        assert!(rule.matches("p", "Category1.Sub"));
        assert!(!rule.matches("p", "Category2"));
        assert!(!rule.matches("p", "My.Category1"));
    }

    #[test]
    fn test_min_level_floor() {
        let rule = Rule::new().min_level(LogLevel::Warning);
        assert!(!rule.allows("p", "c", LogLevel::Info));
        assert!(rule.allows("p", "c", LogLevel::Warning));
        assert!(rule.allows("p", "c", LogLevel::Critical));
    }

    #[test]
    fn test_predicate_receives_arguments() {
        let rule = Rule::new().filter(|provider, category, level| {
            provider == "ConsoleProvider" && category.ends_with(".io") && level >= LogLevel::Info
        });

        assert!(rule.allows("ConsoleProvider", "net.io", LogLevel::Info));
        assert!(!rule.allows("ConsoleProvider", "net.io", LogLevel::Debug));
        assert!(!rule.allows("FileProvider", "net.io", LogLevel::Error));
    }

    #[test]
    fn test_level_floor_checked_before_predicate() {
        let rule = Rule::new()
            .min_level(LogLevel::Error)
            .filter(|_, _, _| panic!("predicate must not run below the floor"));
        assert!(!rule.allows("p", "c", LogLevel::Debug));
    }
}
