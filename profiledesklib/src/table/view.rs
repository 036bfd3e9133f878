//! Derived table views: filtered, sorted and paginated rows.
//!
//! Everything here is a pure function of the records, the columns and the
//! current table state. The view is recomputed on every call to
//! [`Table::view`](super::Table::view).

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::sort::{compare_nulls_last, SortState};
use crate::data::{Record, Value};

/// Pagination summary for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-based)
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; zero when there are no items
    pub total_pages: usize,
}

impl Pagination {
    /// Build a summary, computing the page count.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1)),
        }
    }

    /// Page count as shown to the user (never below 1)
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Whether "previous" is enabled
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether "next" is enabled
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first row shown, or 0 when nothing is shown.
    pub fn first_shown(&self, rows_on_page: usize) -> usize {
        if rows_on_page == 0 {
            0
        } else {
            self.page
                .saturating_sub(1)
                .saturating_mul(self.page_size)
                .saturating_add(1)
        }
    }

    /// 1-based index of the last row shown.
    pub fn last_shown(&self) -> usize {
        self.page
            .saturating_mul(self.page_size)
            .min(self.total_items)
    }
}

/// The rows to display plus their pagination summary.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows on the current page, in display order
    pub rows: Vec<&'a T>,
    /// Pagination summary
    pub pagination: Pagination,
}

impl<T> TableView<'_, T> {
    /// Check if no rows are displayed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep rows where at least one column value contains `filter`, case-insensitively.
///
/// An empty filter keeps every row.
pub fn filter_rows<'a, T: Record>(
    rows: Vec<&'a T>,
    columns: &[Column<T>],
    filter: &str,
) -> Vec<&'a T> {
    if filter.is_empty() {
        return rows;
    }
    let needle = filter.to_lowercase();
    rows.into_iter()
        .filter(|row| columns.iter().any(|col| col.value(row).contains_lowercase(&needle)))
        .collect()
}

/// Stable-sort rows by the column selected by `sort`.
///
/// With no active key, or a key no column answers to, the order is unchanged.
pub fn sort_rows<'a, T: Record>(
    rows: Vec<&'a T>,
    columns: &[Column<T>],
    sort: &SortState,
) -> Vec<&'a T> {
    let Some(key) = sort.by.as_deref() else {
        return rows;
    };
    let Some(column) = columns.iter().find(|col| col.matches_sort_key(key)) else {
        return rows;
    };

    // Resolve every sort value once; accessors may be expensive.
    let mut keyed: Vec<(Value, &'a T)> = rows
        .into_iter()
        .map(|row| (column.sort_value(row), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_nulls_last(a, b, sort.order));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Rows of the 1-based `page` for the given page size.
pub fn page_rows<T>(rows: Vec<&T>, page: usize, page_size: usize) -> Vec<&T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    rows.into_iter().skip(start).take(page_size).collect()
}
