//! Sort direction, sort state, and the nulls-last comparator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending (A-Z, smallest first)
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Descending (Z-A, largest first)
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Short wire form: "asc" or "desc"
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Header indicator arrow
    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column key or sort key driving the order; `None` keeps input order
    pub by: Option<String>,
    /// Sort direction
    pub order: SortOrder,
}

impl SortState {
    /// Sort by `key` in the given direction
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            by: Some(key.into()),
            order,
        }
    }

    /// Check if `key` is the active sort key
    pub fn is_active(&self, key: &str) -> bool {
        self.by.as_deref() == Some(key)
    }

    /// State after a header click on a column whose effective sort key is `key`.
    ///
    /// Clicking the active key flips the direction; any other key starts ascending.
    pub fn toggle(&self, key: &str) -> Self {
        let order = if self.is_active(key) {
            self.order.toggled()
        } else {
            SortOrder::Ascending
        };
        Self::new(key, order)
    }
}

/// Compare two resolved values with nulls last in both directions.
///
/// Only the comparison between defined values is reversed for
/// [`SortOrder::Descending`].
pub fn compare_nulls_last(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
    }
}
