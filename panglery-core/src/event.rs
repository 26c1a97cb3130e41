//! # Event Bag
//!
//! An [`Event`] is the named-parameter bag threaded through one `trigger`
//! call. Hooks match against it, receive a slice of it as arguments, and hand
//! back updates in the same shape.
//!
//! Values are [`Value`]s (`serde_json::Value`): dynamically typed and compared
//! by value, which is what hook conditions rely on.
//!
//! ```rust,ignore
//! let event = fields! { event: "save", path: "/tmp/x", retries: 3 };
//! let retries: u32 = event.value("retries")?;
//! ```

use crate::error::PanglerError;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet, btree_map};

/// A dynamically typed event value.
pub use serde_json::Value;

/// A mutable mapping from parameter name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    fields: BTreeMap<String, Value>,
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the event has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a field is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Borrow a field's raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert or overwrite a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Field names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Deserialize one field into `T`.
    ///
    /// # Errors
    ///
    /// [`PanglerError::MissingField`] if the field is absent and
    /// [`PanglerError::Extract`] if its value does not fit `T`.
    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Result<T, PanglerError> {
        let raw = self
            .fields
            .get(key)
            .ok_or_else(|| PanglerError::MissingField(key.to_owned()))?;
        T::deserialize(raw).map_err(|source| PanglerError::Extract {
            key: key.to_owned(),
            source,
        })
    }

    /// Write every field of `updates` into this event, overwriting.
    pub fn merge(&mut self, updates: Event) {
        self.fields.extend(updates.fields);
    }

    /// Copy out the fields whose names are in `keys`.
    pub(crate) fn restrict(&self, keys: &BTreeSet<String>) -> Event {
        self.fields
            .iter()
            .filter(|(key, _)| keys.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Event {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Event {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.fields.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl IntoIterator for Event {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, Value>> for Event {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<serde_json::Map<String, Value>> for Event {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Build an [`Event`] from `name: value` pairs.
///
/// Values may be any `serde::Serialize` expression.
///
/// ```rust,ignore
/// pangler.trigger(fields! { event: "test", foo: 3 })?;
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Event::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {{
        let mut event = $crate::Event::new();
        $(
            event.insert(stringify!($key), $crate::serde_json::json!($value));
        )+
        event
    }};
}
