//! Flat key/value properties attached to a log call

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// String key/value pairs carried alongside a message.
///
/// Keys are kept sorted so that sinks render properties deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    fields: BTreeMap<String, String>,
}

impl Properties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a property (builder form)
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.fields.insert(key.into(), value.to_string());
        self
    }

    /// Add or overwrite a property
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.fields.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Properties
where
    K: Into<String>,
    V: ToString,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_creation() {
        let props = Properties::new();
        assert!(props.is_empty());
        assert_eq!(props.len(), 0);
    }

    #[test]
    fn test_properties_builder() {
        let props = Properties::new()
            .with("user_id", 123)
            .with("username", "john_doe")
            .with("active", true);

        assert_eq!(props.len(), 3);
        assert_eq!(props.get("user_id"), Some("123"));
        assert_eq!(props.get("active"), Some("true"));
    }

    #[test]
    fn test_properties_sorted_format() {
        let props = Properties::from([("zeta", "last"), ("alpha", "first")]);
        assert_eq!(props.format_fields(), "alpha=first zeta=last");
    }

    #[test]
    fn test_insert_overwrites() {
        let mut props = Properties::new();
        props.insert("key", "old");
        props.insert("key", "new");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("new"));
    }
}
