use crate::JsonMap;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// An out-of-band, per-operation mapping that links use to communicate with
/// one another. Context is never sent over the wire.
///
/// [`Context`] is an immutable record: [`Context::merge()`] produces a new
/// value in which the top-level keys of the partial context replace those of
/// `self` (a shallow, one-level-deep merge). Nested objects are *replaced*,
/// not merged.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Context {
    entries: IndexMap<String, Value>,
}
impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that returns a copy of this [`Context`] with
    /// `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Deserialize the value stored at `key`. Returns `None` if the key is
    /// absent or its value does not have the requested shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Shallow-merge `partial` over `self`.
    pub fn merge(&self, partial: &Context) -> Context {
        let mut entries = self.entries.clone();
        for (key, value) in &partial.entries {
            entries.insert(key.clone(), value.clone());
        }
        Context { entries }
    }
}
impl From<JsonMap> for Context {
    fn from(map: JsonMap) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}
impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Context {
    fn from(entries: [(K, V); N]) -> Self {
        Self {
            entries: entries.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
