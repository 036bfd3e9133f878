//! Column definitions, generic over the record type.

use std::fmt;

use crate::data::{Record, Value};

/// Derives the display/sort/filter value of a column from a record.
pub type Accessor<T> = Box<dyn Fn(&T) -> Value>;

/// Produces the display text of a cell, overriding the accessor.
pub type Renderer<T> = Box<dyn Fn(&T) -> String>;

/// One displayable field of a table.
///
/// Without an accessor the column reads the record field named by its key
/// (or by its sort key when sorting).
pub struct Column<T> {
    key: String,
    header: String,
    accessor: Option<Accessor<T>>,
    renderer: Option<Renderer<T>>,
    sortable: bool,
    sort_key: Option<String>,
}

impl<T> Column<T> {
    /// Create a sortable column reading the field named `key`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor: None,
            renderer: None,
            sortable: true,
            sort_key: None,
        }
    }

    /// Derive the column value with `f` instead of a field lookup.
    pub fn accessor<F, V>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> V + 'static,
        V: Into<Value>,
    {
        self.accessor = Some(Box::new(move |row| f(row).into()));
        self
    }

    /// Render cells with `f`.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        self.renderer = Some(Box::new(f));
        self
    }

    /// Enable or disable header-click sorting
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sort under a different key than the column key
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Unique column key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header label
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Whether header clicks sort by this column
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The key reported when this column becomes the sort column
    pub fn effective_sort_key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.key)
    }

    /// Whether an active sort key selects this column
    pub fn matches_sort_key(&self, key: &str) -> bool {
        self.key == key || self.sort_key.as_deref() == Some(key)
    }
}

impl<T: Record> Column<T> {
    /// Value used for filtering and default display.
    pub fn value(&self, row: &T) -> Value {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// Value used for sorting.
    pub fn sort_value(&self, row: &T) -> Value {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.field(self.effective_sort_key()),
        }
    }

    /// Display text of the cell for `row`.
    pub fn cell(&self, row: &T) -> String {
        match &self.renderer {
            Some(renderer) => renderer(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("accessor", &self.accessor.is_some())
            .field("renderer", &self.renderer.is_some())
            .field("sortable", &self.sortable)
            .field("sort_key", &self.sort_key)
            .finish()
    }
}
