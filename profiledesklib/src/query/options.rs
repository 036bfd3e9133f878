//! List query parameters: search text, ordering and page window.
//!
//! These mirror the query string the admin dashboard sends to the client
//! list: `page`, `pageSize`, `sortBy`, `sortOrder` and `search`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ProfileDeskError;
use crate::table::SortOrder;
use crate::Result;

/// Field to order clients by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClientSort {
    /// Order by account name
    Name,
    /// Order by age, i.e. by date of birth in the opposite direction
    Age,
    /// Order by account creation time
    #[default]
    CreatedAt,
    /// Order by any other profile field, looked up by key
    Field(String),
}

impl FromStr for ClientSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" => Err("empty sort field".to_string()),
            "name" => Ok(ClientSort::Name),
            "age" => Ok(ClientSort::Age),
            "createdAt" => Ok(ClientSort::CreatedAt),
            other => Ok(ClientSort::Field(other.to_string())),
        }
    }
}

/// A client list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientQuery {
    /// Page to return (1-based)
    pub page: usize,
    /// Clients per page
    pub page_size: usize,
    /// Ordering field
    pub sort_by: ClientSort,
    /// Ordering direction as requested (before the age reversal)
    pub sort_order: SortOrder,
    /// Case-insensitive search text; empty matches everything
    pub search: String,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            sort_by: ClientSort::CreatedAt,
            sort_order: SortOrder::Descending,
            search: String::new(),
        }
    }
}

impl ClientQuery {
    /// Create a query with the list defaults (page 1 of 10, newest first).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse query-string pairs. Unknown keys are ignored; missing keys keep
    /// their defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = |message: String| ProfileDeskError::InvalidQuery {
                key: key.to_string(),
                value: value.to_string(),
                message,
            };
            match key {
                "page" => query.page = parse_positive(value).map_err(invalid)?,
                "pageSize" => query.page_size = parse_positive(value).map_err(invalid)?,
                "sortBy" => query.sort_by = value.parse().map_err(invalid)?,
                "sortOrder" => query.sort_order = value.parse().map_err(invalid)?,
                "search" => query.search = value.to_string(),
                _ => tracing::trace!(key, "ignoring unknown query parameter"),
            }
        }
        Ok(query)
    }

    /// Builder: page
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Builder: page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder: ordering
    pub fn sort(mut self, by: ClientSort, order: SortOrder) -> Self {
        self.sort_by = by;
        self.sort_order = order;
        self
    }

    /// Builder: search text
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

fn parse_positive(value: &str) -> std::result::Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
