//! Primitive cell values used for display, filtering and sorting.

use std::cmp::Ordering;
use std::fmt;

/// A primitive value resolved from a record for one column.
///
/// Accessors and field lookups both produce a `Value`. `Null` covers both
/// "field present but empty" and "field missing".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing or null value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Any numeric value
    Number(f64),
    /// Text value
    Text(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Case-insensitive substring test against an already lowercased needle.
    ///
    /// `Null` coerces to the empty string, so it only matches an empty needle.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.to_string().to_lowercase().contains(needle)
    }

    /// Ordering between two values of the same kind.
    ///
    /// Values of different kinds order by kind (`Null`, `Bool`, `Number`,
    /// `Text`), which keeps the comparison a total order for `sort_by`.
    /// Numbers use `f64::total_cmp`, so NaN never breaks a sort.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::Text(_) => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            // Nested structures display as compact JSON
            other => Value::Text(other.to_string()),
        }
    }
}
