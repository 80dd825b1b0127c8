//! Factory options: default level and ordered rule set

use super::log_level::LogLevel;
use super::rule::Rule;
use std::sync::Arc;

/// Routing configuration consumed by [`LoggerFactory`](super::LoggerFactory).
///
/// Rule order is significant: the first rule whose provider and category
/// filters match is selected. Callers order rules from most to least specific.
///
/// # Example
///
/// ```
/// use rust_log_router::{LogLevel, RouterOptions, Rule};
///
/// let options = RouterOptions::new()
///     .min_level(LogLevel::Critical)
///     .rule(Rule::new().category("Category1").min_level(LogLevel::Warning));
///
/// assert_eq!(options.rules().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub default_min_level: LogLevel,
    pub rules: Vec<Rule>,
}

impl RouterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Level floor of the implicit default rule
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.default_min_level = level;
        self
    }

    /// Append a rule
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Freeze the options into a rule set that always has a default rule
    pub(crate) fn into_rule_set(self) -> RuleSet {
        RuleSet::new(self.rules, self.default_min_level)
    }
}

/// Immutable, ordered rules with the default-rule invariant enforced.
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    rules: Vec<Arc<Rule>>,
}

impl RuleSet {
    pub(crate) fn new(rules: Vec<Rule>, default_min_level: LogLevel) -> Self {
        let mut rules: Vec<Arc<Rule>> = rules.into_iter().map(Arc::new).collect();

        // No default rule given: add one carrying the default level
        if !rules.iter().any(|r| r.is_default()) {
            rules.push(Arc::new(Rule::new().min_level(default_min_level)));
        }

        Self { rules }
    }

    /// First rule matching `(provider, category)` in declaration order
    pub(crate) fn select(&self, provider: &str, category: &str) -> Arc<Rule> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(provider, category))
            .expect("rule set always contains a default rule");
        Arc::clone(rule)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }
}
