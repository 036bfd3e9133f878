//! Field lookup by key for arbitrary record shapes.

use std::collections::HashMap;

use super::value::Value;

/// A record the table can read fields from.
///
/// Lookups never fail: a missing field resolves to [`Value::Null`].
pub trait Record {
    /// Resolve the field named `key`.
    fn field(&self, key: &str) -> Value;
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Value {
        self.get(key).map(Value::from).unwrap_or(Value::Null)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).map(Value::from).unwrap_or(Value::Null)
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Value {
        (**self).field(key)
    }
}
