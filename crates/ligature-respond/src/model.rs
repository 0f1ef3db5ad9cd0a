//! Model attributes.
//!
//! [`Attributes`] is the name → value mapping a handler accumulates while
//! it runs and that travels with a view reference to the renderer. It is
//! per-request state with no lifecycle beyond the response.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered attribute mapping handed to the view renderer.
///
/// # Example
///
/// ```rust
/// use ligature_respond::Attributes;
///
/// let mut model = Attributes::new();
/// model.add("data", "hello!");
/// model.add("count", 3);
///
/// assert_eq!(model.get("data"), Some(&serde_json::json!("hello!")));
/// assert_eq!(model.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    inner: IndexMap<String, serde_json::Value>,
}

impl Attributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, replacing any previous value under the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Returns an attribute by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.inner.get(name)
    }

    /// Returns true if an attribute with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no attributes were accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Inserts every attribute from `other` that is not already present.
    ///
    /// Existing entries win, so a prebuilt view bundle keeps its own
    /// attributes when the accumulated model is folded in.
    pub fn merge_missing(&mut self, other: &Attributes) {
        for (name, value) in other.iter() {
            if !self.inner.contains_key(name) {
                self.inner.insert(name.to_string(), value.clone());
            }
        }
    }
}

impl FromIterator<(String, serde_json::Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut model = Attributes::new();
        model.add("data", "hello!");

        assert_eq!(model.get("data"), Some(&serde_json::json!("hello!")));
        assert_eq!(model.get("missing"), None);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_add_replaces() {
        let mut model = Attributes::new();
        model.add("data", "first");
        model.add("data", "second");

        assert_eq!(model.len(), 1);
        assert_eq!(model.get("data"), Some(&serde_json::json!("second")));
    }

    #[test]
    fn test_iteration_order() {
        let mut model = Attributes::new();
        model.add("b", 1);
        model.add("a", 2);

        let names: Vec<&str> = model.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut bundle = Attributes::new();
        bundle.add("data", "from bundle");

        let mut accumulated = Attributes::new();
        accumulated.add("data", "from model");
        accumulated.add("extra", true);

        bundle.merge_missing(&accumulated);

        assert_eq!(bundle.get("data"), Some(&serde_json::json!("from bundle")));
        assert_eq!(bundle.get("extra"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_serializes_as_object() {
        let mut model = Attributes::new();
        model.add("data", "hello!");

        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#"{"data":"hello!"}"#);
    }
}
