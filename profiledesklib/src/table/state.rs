//! The table state reducer.
//!
//! A [`Table`] owns its columns, the state sources for filter and sort, and
//! the page/page-size counters. User actions go through the methods below
//! (or [`Table::dispatch`]); each fires its listener and updates owned state.
//! Rendering reads a [`TableView`] computed from the records on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::options::Listeners;
use super::sort::{SortOrder, SortState};
use super::source::StateSource;
use super::view::{filter_rows, page_rows, sort_rows, Pagination, TableView};
use crate::data::Record;
use crate::error::ProfileDeskError;
use crate::Result;

/// Who is responsible for filtering, sorting and slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableMode {
    /// The table filters, sorts and pages the full dataset in memory
    Uncontrolled,
    /// The caller already did; the data is the current page of `total_items`
    Controlled { total_items: usize },
}

/// A user action, for callers that replay or queue interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableAction {
    /// Typing in the filter box
    SetFilter(String),
    /// Clicking the header of the column with this key
    ToggleSort(String),
    /// Jumping to a page
    SetPage(usize),
    /// Choosing a page size
    SetPageSize(usize),
}

/// A filterable, sortable, paginated table over records of type `T`.
///
/// Created with [`TableOptions`](super::TableOptions).
pub struct Table<T> {
    pub(crate) columns: Vec<Column<T>>,
    pub(crate) filterable: bool,
    pub(crate) filter: StateSource<String>,
    pub(crate) sort: StateSource<SortState>,
    pub(crate) mode: TableMode,
    pub(crate) page: usize,
    pub(crate) page_size: usize,
    pub(crate) page_size_options: Vec<usize>,
    pub(crate) listeners: Listeners<T>,
}

impl<T> Table<T> {
    /// Column definitions in display order
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Whether a filter input is shown
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Current filter text
    pub fn filter(&self) -> &str {
        self.filter.get()
    }

    /// Where the filter text comes from
    pub fn filter_source(&self) -> &StateSource<String> {
        &self.filter
    }

    /// Current sort key and direction
    pub fn sort(&self) -> &SortState {
        self.sort.get()
    }

    /// Where the sort state comes from
    pub fn sort_source(&self) -> &StateSource<SortState> {
        &self.sort
    }

    /// Current page (1-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page sizes the user can pick
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Controlled or uncontrolled
    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Check if the caller does filtering, sorting and paging
    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, TableMode::Controlled { .. })
    }

    /// Whether rows carry edit/delete actions
    pub fn has_actions(&self) -> bool {
        self.listeners.edit.is_some() || self.listeners.delete.is_some()
    }

    /// Number of rendered columns, counting the actions column
    pub fn column_span(&self) -> usize {
        self.columns.len() + usize::from(self.has_actions())
    }

    /// Change the filter text from the filter box.
    ///
    /// Fires the filter listener, updates owned filter text, and returns to
    /// page 1. Does nothing on a table without a filter input.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        if !self.filterable {
            tracing::trace!("filter ignored: table is not filterable");
            return;
        }
        let text = text.into();
        if let Some(listener) = self.listeners.filter.as_mut() {
            listener(&text);
        }
        let updated = self.filter.apply(text);
        self.page = 1;
        tracing::debug!(filter = %self.filter(), updated, "filter changed");
    }

    /// Handle a click on the header of the column keyed `column_key`.
    ///
    /// Returns `false` when no such column exists or it is not sortable.
    /// Otherwise fires the sort listener, updates owned sort state, and
    /// returns to page 1.
    pub fn toggle_sort(&mut self, column_key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|col| col.key() == column_key) else {
            tracing::trace!(column = column_key, "sort ignored: unknown column");
            return false;
        };
        if !column.is_sortable() {
            tracing::trace!(column = column_key, "sort ignored: column not sortable");
            return false;
        }

        let next = self.sort.get().toggle(column.effective_sort_key());
        if let Some(listener) = self.listeners.sort.as_mut() {
            listener(next.by.as_deref(), next.order);
        }
        tracing::debug!(by = ?next.by, order = %next.order, "sort changed");
        self.sort.apply(next);
        self.page = 1;
        true
    }

    /// Go to `page` (1-based) and fire the page listener.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(ProfileDeskError::InvalidPage(page));
        }
        self.page = page;
        if let Some(listener) = self.listeners.page.as_mut() {
            listener(page);
        }
        tracing::debug!(page, "page changed");
        Ok(())
    }

    /// "Previous" button. Returns `false` when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.set_page(self.page - 1).is_ok()
    }

    /// Choose a page size from the offered options and return to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !self.page_size_options.contains(&size) {
            return Err(ProfileDeskError::InvalidPageSize {
                size,
                message: format!("expected one of {:?}", self.page_size_options),
            });
        }
        self.page_size = size;
        self.page = 1;
        if let Some(listener) = self.listeners.page_size.as_mut() {
            listener(size);
        }
        tracing::debug!(page_size = size, "page size changed");
        Ok(())
    }

    /// Fire the edit listener for `row`. Returns `false` without one.
    pub fn edit_row(&mut self, row: &T) -> bool {
        match self.listeners.edit.as_mut() {
            Some(listener) => {
                listener(row);
                true
            }
            None => false,
        }
    }

    /// Fire the delete listener for `row`. Returns `false` without one.
    pub fn delete_row(&mut self, row: &T) -> bool {
        match self.listeners.delete.as_mut() {
            Some(listener) => {
                listener(row);
                true
            }
            None => false,
        }
    }

    /// Caller-side update of the filter text (makes it externally driven).
    pub fn sync_filter(&mut self, text: impl Into<String>) {
        self.filter.sync(text.into());
    }

    /// Caller-side update of the sort state (makes it externally driven).
    pub fn sync_sort(&mut self, by: Option<String>, order: SortOrder) {
        self.sort.sync(SortState { by, order });
    }

    /// Caller-side update of the total item count.
    ///
    /// `Some` switches to controlled mode, `None` back to uncontrolled.
    pub fn set_total_items(&mut self, total_items: Option<usize>) {
        self.mode = match total_items {
            Some(total_items) => TableMode::Controlled { total_items },
            None => TableMode::Uncontrolled,
        };
    }
}

impl<T: Record> Table<T> {
    /// Apply one user action.
    ///
    /// Unknown or unsortable columns in `ToggleSort` are ignored, matching
    /// a click on a header that does not react.
    pub fn dispatch(&mut self, action: TableAction) -> Result<()> {
        match action {
            TableAction::SetFilter(text) => self.set_filter(text),
            TableAction::ToggleSort(key) => {
                self.toggle_sort(&key);
            }
            TableAction::SetPage(page) => self.set_page(page)?,
            TableAction::SetPageSize(size) => self.set_page_size(size)?,
        }
        Ok(())
    }

    /// "Next" button. Returns `false` when already on the last page.
    pub fn next_page(&mut self, data: &[T]) -> bool {
        if self.page >= self.pagination(data).total_pages {
            return false;
        }
        self.set_page(self.page + 1).is_ok()
    }

    /// Pagination summary for `data` under the current state.
    pub fn pagination(&self, data: &[T]) -> Pagination {
        let total = match self.mode {
            TableMode::Controlled { total_items } => total_items,
            TableMode::Uncontrolled => self.visible_rows(data).len(),
        };
        Pagination::new(self.page, self.page_size, total)
    }

    /// The rows to render for `data` plus the pagination summary.
    ///
    /// In controlled mode `data` is returned untouched; otherwise it is
    /// filtered, sorted and cut to the current page.
    pub fn view<'a>(&self, data: &'a [T]) -> TableView<'a, T> {
        match self.mode {
            TableMode::Controlled { total_items } => TableView {
                rows: data.iter().collect(),
                pagination: Pagination::new(self.page, self.page_size, total_items),
            },
            TableMode::Uncontrolled => {
                let rows = self.visible_rows(data);
                let pagination = Pagination::new(self.page, self.page_size, rows.len());
                TableView {
                    rows: page_rows(rows, self.page, self.page_size),
                    pagination,
                }
            }
        }
    }

    /// Filtered and sorted rows before pagination (uncontrolled semantics).
    fn visible_rows<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        let rows: Vec<&'a T> = data.iter().collect();
        let rows = if self.filterable {
            filter_rows(rows, &self.columns, self.filter())
        } else {
            rows
        };
        sort_rows(rows, &self.columns, self.sort())
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("filterable", &self.filterable)
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("mode", &self.mode)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableOptions;
    use serde_json::{json, Value as Json};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns() -> Vec<Column<Json>> {
        vec![
            Column::new("name", "Name"),
            Column::new("age", "Age"),
            Column::new("photo", "Photo").sortable(false),
        ]
    }

    fn five_people() -> Vec<Json> {
        ["Eve", "Dan", "Cid", "Bob", "Amy"]
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "name": name, "age": 20 + i }))
            .collect()
    }

    fn names(rows: &[&Json]) -> Vec<String> {
        rows.iter()
            .map(|r| r["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_uncontrolled_pagination_example() {
        let data = five_people();
        let mut table = TableOptions::new(columns())
            .page_size_options(vec![2, 5])
            .initial_page_size(2)
            .build()
            .unwrap();
        table.set_page(2).unwrap();

        let view = table.view(&data);
        assert_eq!(names(&view.rows), ["Cid", "Bob"]);
        assert_eq!(view.pagination.total_pages, 3);
        assert!(view.pagination.has_prev());
        assert!(view.pagination.has_next());
    }

    #[test]
    fn test_filter_resets_page() {
        let data = five_people();
        let mut table = TableOptions::new(columns())
            .filterable(true)
            .page_size_options(vec![2])
            .initial_page_size(2)
            .build()
            .unwrap();
        table.set_page(3).unwrap();
        table.set_filter("a");
        assert_eq!(table.page(), 1);
        assert_eq!(table.filter(), "a");

        let view = table.view(&data);
        assert_eq!(names(&view.rows), ["Dan", "Amy"]);
        assert_eq!(view.pagination.total_items, 2);
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut table = TableOptions::<Json>::new(columns()).build().unwrap();
        table.set_page(4).unwrap();
        table.set_page_size(20).unwrap();
        assert_eq!(table.page(), 1);
        assert_eq!(table.page_size(), 20);
    }

    #[test]
    fn test_page_size_must_be_offered() {
        let mut table = TableOptions::<Json>::new(columns()).build().unwrap();
        assert!(table.set_page_size(7).is_err());
        assert_eq!(table.page_size(), 10);
    }

    #[test]
    fn test_page_zero_rejected() {
        let mut table = TableOptions::<Json>::new(columns()).build().unwrap();
        assert!(matches!(
            table.set_page(0),
            Err(ProfileDeskError::InvalidPage(0))
        ));
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let data = five_people();
        let mut table = TableOptions::new(columns()).build().unwrap();

        assert!(table.toggle_sort("name"));
        assert_eq!(table.sort(), &SortState::new("name", SortOrder::Ascending));
        assert_eq!(names(&table.view(&data).rows)[0], "Amy");

        assert!(table.toggle_sort("name"));
        assert_eq!(table.sort(), &SortState::new("name", SortOrder::Descending));
        assert_eq!(names(&table.view(&data).rows)[0], "Eve");

        assert!(table.toggle_sort("age"));
        assert_eq!(table.sort(), &SortState::new("age", SortOrder::Ascending));
    }

    #[test]
    fn test_sort_resets_page() {
        let mut table = TableOptions::<Json>::new(columns()).build().unwrap();
        table.set_page(2).unwrap();
        table.toggle_sort("name");
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_unsortable_and_unknown_columns_ignored() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let mut table = TableOptions::<Json>::new(columns())
            .on_sort_change(move |_, _| *counter.borrow_mut() += 1)
            .build()
            .unwrap();
        assert!(!table.toggle_sort("photo"));
        assert!(!table.toggle_sort("nope"));
        assert_eq!(table.sort(), &SortState::default());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_toggle_uses_sort_key() {
        let cols: Vec<Column<Json>> = vec![Column::new("dobAge", "DoB & Age").sort_key("age")];
        let mut table = TableOptions::new(cols).build().unwrap();
        table.toggle_sort("dobAge");
        assert_eq!(table.sort().by.as_deref(), Some("age"));
        table.toggle_sort("dobAge");
        assert_eq!(table.sort().order, SortOrder::Descending);
    }

    #[test]
    fn test_listeners_fire_in_uncontrolled_mode() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
        let mut table = TableOptions::<Json>::new(columns())
            .filterable(true)
            .on_filter_change(move |f| l1.borrow_mut().push(format!("filter:{}", f)))
            .on_sort_change(move |by, order| {
                l2.borrow_mut()
                    .push(format!("sort:{}:{}", by.unwrap_or_default(), order))
            })
            .on_page_change(move |p| l3.borrow_mut().push(format!("page:{}", p)))
            .on_page_size_change(move |s| l4.borrow_mut().push(format!("size:{}", s)))
            .build()
            .unwrap();

        table.set_filter("am");
        table.toggle_sort("age");
        table.set_page(2).unwrap();
        table.set_page_size(5).unwrap();

        assert_eq!(
            *log.borrow(),
            ["filter:am", "sort:age:asc", "page:2", "size:5"]
        );
        // Owned state still follows the actions
        assert_eq!(table.filter(), "am");
        assert_eq!(table.sort().by.as_deref(), Some("age"));
        assert_eq!(table.page_size(), 5);
    }

    #[test]
    fn test_external_filter_not_updated_internally() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let mut table = TableOptions::<Json>::new(columns())
            .filterable(true)
            .external_filter("")
            .on_filter_change(move |f| *sink.borrow_mut() = f.to_string())
            .build()
            .unwrap();

        table.set_filter("bob");
        assert_eq!(*seen.borrow(), "bob");
        assert_eq!(table.filter(), "");
        assert_eq!(table.page(), 1);

        table.sync_filter("bob");
        assert_eq!(table.filter(), "bob");
    }

    #[test]
    fn test_external_sort_not_updated_internally() {
        let mut table = TableOptions::<Json>::new(columns())
            .external_sort(Some("name".to_string()), SortOrder::Ascending)
            .build()
            .unwrap();
        table.toggle_sort("name");
        assert_eq!(table.sort(), &SortState::new("name", SortOrder::Ascending));

        table.sync_sort(Some("name".to_string()), SortOrder::Descending);
        assert_eq!(table.sort().order, SortOrder::Descending);
    }

    #[test]
    fn test_controlled_mode_renders_data_as_given() {
        let data = vec![json!({ "name": "Zed" }), json!({ "name": "Amy" })];
        let mut table = TableOptions::new(columns())
            .filterable(true)
            .total_items(42)
            .build()
            .unwrap();
        table.set_filter("amy");
        table.toggle_sort("name");

        let view = table.view(&data);
        assert_eq!(names(&view.rows), ["Zed", "Amy"]);
        assert_eq!(view.pagination.total_items, 42);
        assert_eq!(view.pagination.total_pages, 5);
    }

    #[test]
    fn test_not_filterable_ignores_filter() {
        let data = five_people();
        let mut table = TableOptions::new(columns()).build().unwrap();
        table.set_filter("zzz");
        assert_eq!(table.filter(), "");
        assert_eq!(table.view(&data).rows.len(), 5);
    }

    #[test]
    fn test_prev_next_boundaries() {
        let data = five_people();
        let mut table = TableOptions::new(columns())
            .page_size_options(vec![2])
            .initial_page_size(2)
            .build()
            .unwrap();
        assert!(!table.prev_page());
        assert!(table.next_page(&data));
        assert!(table.next_page(&data));
        assert_eq!(table.page(), 3);
        assert!(!table.next_page(&data));
        assert!(table.prev_page());
        assert_eq!(table.page(), 2);
    }

    #[test]
    fn test_next_disabled_when_empty() {
        let data: Vec<Json> = vec![];
        let mut table = TableOptions::new(columns()).build().unwrap();
        assert!(!table.next_page(&data));
        let view = table.view(&data);
        assert!(view.is_empty());
        assert_eq!(view.pagination.display_total_pages(), 1);
    }

    #[test]
    fn test_row_actions() {
        let edited = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&edited);
        let mut table = TableOptions::<Json>::new(columns())
            .on_edit(move |row| sink.borrow_mut().push(row["name"].to_string()))
            .build()
            .unwrap();
        assert!(table.has_actions());
        assert_eq!(table.column_span(), 4);
        assert!(table.edit_row(&json!({ "name": "Amy" })));
        assert!(!table.delete_row(&json!({ "name": "Amy" })));
        assert_eq!(*edited.borrow(), ["\"Amy\""]);
    }

    #[test]
    fn test_dispatch() {
        let mut table = TableOptions::<Json>::new(columns())
            .filterable(true)
            .build()
            .unwrap();
        table.dispatch(TableAction::SetPage(3)).unwrap();
        table
            .dispatch(TableAction::ToggleSort("photo".to_string()))
            .unwrap();
        assert_eq!(table.page(), 3);
        table
            .dispatch(TableAction::SetFilter("x".to_string()))
            .unwrap();
        assert_eq!(table.page(), 1);
        assert!(table.dispatch(TableAction::SetPageSize(3)).is_err());
    }

    #[test]
    fn test_switch_to_controlled() {
        let data = five_people();
        let mut table = TableOptions::new(columns()).build().unwrap();
        table.set_total_items(Some(100));
        assert!(table.is_controlled());
        assert_eq!(table.pagination(&data).total_items, 100);
        table.set_total_items(None);
        assert_eq!(table.pagination(&data).total_items, 5);
    }
}
