//! Table configuration: columns, mode inputs, and change listeners.

use std::collections::HashSet;

use super::column::Column;
use super::sort::{SortOrder, SortState};
use super::source::StateSource;
use super::state::{Table, TableMode};
use crate::error::ProfileDeskError;
use crate::Result;

/// Page sizes offered when none are configured
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Starting page size when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub(crate) type FilterListener = Box<dyn FnMut(&str)>;
pub(crate) type SortListener = Box<dyn FnMut(Option<&str>, SortOrder)>;
pub(crate) type PageListener = Box<dyn FnMut(usize)>;
pub(crate) type RowListener<T> = Box<dyn FnMut(&T)>;

/// Callbacks fired on user actions, whether or not the table owns the state.
pub(crate) struct Listeners<T> {
    pub(crate) filter: Option<FilterListener>,
    pub(crate) sort: Option<SortListener>,
    pub(crate) page: Option<PageListener>,
    pub(crate) page_size: Option<PageListener>,
    pub(crate) edit: Option<RowListener<T>>,
    pub(crate) delete: Option<RowListener<T>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            page: None,
            page_size: None,
            edit: None,
            delete: None,
        }
    }
}

/// Builder for a [`Table`].
///
/// ```rust
/// use profiledesklib::table::{Column, TableOptions};
/// use serde_json::Value;
///
/// let table = TableOptions::<Value>::new(vec![
///     Column::new("name", "Name"),
///     Column::new("age", "Age"),
/// ])
/// .filterable(true)
/// .initial_page_size(5)
/// .build()
/// .unwrap();
/// assert_eq!(table.page_size(), 5);
/// assert!(!table.is_controlled());
/// ```
pub struct TableOptions<T> {
    columns: Vec<Column<T>>,
    filterable: bool,
    filter: StateSource<String>,
    sort: StateSource<SortState>,
    total_items: Option<usize>,
    page_size_options: Vec<usize>,
    initial_page_size: usize,
    listeners: Listeners<T>,
}

impl<T> TableOptions<T> {
    /// Start from a list of columns; everything else uses defaults.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            filterable: false,
            filter: StateSource::default(),
            sort: StateSource::default(),
            total_items: None,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            initial_page_size: DEFAULT_PAGE_SIZE,
            listeners: Listeners::default(),
        }
    }

    /// Show a filter input and filter rows by it
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Drive the filter text from the caller. An empty string still counts.
    pub fn external_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = StateSource::External(filter.into());
        self
    }

    /// Drive the sort key and direction from the caller.
    pub fn external_sort(mut self, by: Option<String>, order: SortOrder) -> Self {
        self.sort = StateSource::External(SortState { by, order });
        self
    }

    /// Switch to controlled mode: `data` is already the current page.
    pub fn total_items(mut self, total: usize) -> Self {
        self.total_items = Some(total);
        self
    }

    /// Page sizes the user can choose from
    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Starting page size
    pub fn initial_page_size(mut self, size: usize) -> Self {
        self.initial_page_size = size;
        self
    }

    /// Called with the new filter text
    pub fn on_filter_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.listeners.filter = Some(Box::new(f));
        self
    }

    /// Called with the new sort key and direction
    pub fn on_sort_change(mut self, f: impl FnMut(Option<&str>, SortOrder) + 'static) -> Self {
        self.listeners.sort = Some(Box::new(f));
        self
    }

    /// Called with the new page number
    pub fn on_page_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.listeners.page = Some(Box::new(f));
        self
    }

    /// Called with the new page size
    pub fn on_page_size_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.listeners.page_size = Some(Box::new(f));
        self
    }

    /// Called when a row's "Edit" action is used; adds the actions column
    pub fn on_edit(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.listeners.edit = Some(Box::new(f));
        self
    }

    /// Called when a row's "Delete" action is used; adds the actions column
    pub fn on_delete(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.listeners.delete = Some(Box::new(f));
        self
    }

    /// Validate the configuration and create the table.
    ///
    /// Fails when there are no columns, when two columns share a key, or
    /// when a page size is zero.
    pub fn build(self) -> Result<Table<T>> {
        if self.columns.is_empty() {
            return Err(ProfileDeskError::NoColumns);
        }

        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.key()) {
                return Err(ProfileDeskError::DuplicateColumn(col.key().to_string()));
            }
        }

        if self.page_size_options.is_empty() {
            return Err(ProfileDeskError::InvalidPageSize {
                size: 0,
                message: "no page size options".to_string(),
            });
        }
        if let Some(&size) = self.page_size_options.iter().find(|&&s| s == 0) {
            return Err(ProfileDeskError::InvalidPageSize {
                size,
                message: "page size options must be positive".to_string(),
            });
        }
        if self.initial_page_size == 0 {
            return Err(ProfileDeskError::InvalidPageSize {
                size: 0,
                message: "initial page size must be positive".to_string(),
            });
        }

        let mode = match self.total_items {
            Some(total_items) => TableMode::Controlled { total_items },
            None => TableMode::Uncontrolled,
        };

        tracing::debug!(
            columns = self.columns.len(),
            ?mode,
            page_size = self.initial_page_size,
            "table created"
        );

        Ok(Table {
            columns: self.columns,
            filterable: self.filterable,
            filter: self.filter,
            sort: self.sort,
            mode,
            page: 1,
            page_size: self.initial_page_size,
            page_size_options: self.page_size_options,
            listeners: self.listeners,
        })
    }
}
