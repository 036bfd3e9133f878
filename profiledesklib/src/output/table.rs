//! Presentation-ready table structures.
//!
//! This module provides `RenderedTable`, the final data structure before
//! display. It can be serialized to JSON or laid out as text; no filtering,
//! sorting or paging happens here.
//!
//! The data flow is:
//! 1. Records (any `Record`)
//! 2. Table + TableView (state applied: filtered, sorted, paged)
//! 3. RenderedTable (strings: headers, cells, footer)

use serde::{Deserialize, Serialize};

use crate::data::Record;
use crate::table::{Table, TableView};

/// Message shown in the single row of an empty table
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Header label of the row-actions column
pub const ACTIONS_HEADER: &str = "Actions";

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Column key
    pub key: String,
    /// Header label
    pub label: String,
    /// Whether clicking the header sorts
    pub sortable: bool,
    /// "↑" or "↓" on the active sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
}

/// One data row: the cell texts in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRow {
    pub cells: Vec<String>,
    /// Row action labels ("Edit", "Delete") when actions are enabled
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actions: Vec<String>,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Body {
    /// Data rows
    Rows { rows: Vec<RenderedRow> },
    /// A single message row spanning `colspan` columns
    Empty { message: String, colspan: usize },
}

/// Pagination controls below the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// "Showing a to b of c entries"
    pub showing: String,
    /// Current page
    pub page: usize,
    /// Page count as displayed (at least 1)
    pub total_pages: usize,
    /// Selected page size
    pub page_size: usize,
    /// Page size choices
    pub page_size_options: Vec<usize>,
    /// "Prev" button enabled
    pub prev_enabled: bool,
    /// "Next" button enabled
    pub next_enabled: bool,
}

/// Table-ready strings for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Filter input contents; `None` when the table has no filter input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Column headers
    pub headers: Vec<HeaderCell>,
    /// Whether an actions column follows the headers
    pub actions: bool,
    /// Rows or the empty-table message
    pub body: Body,
    /// Pagination controls
    pub footer: Footer,
}

impl RenderedTable {
    /// Render `view` with the columns and state of `table`.
    pub fn from_view<T: Record>(table: &Table<T>, view: &TableView<'_, T>) -> Self {
        let sort = table.sort();
        let headers = table
            .columns()
            .iter()
            .map(|col| HeaderCell {
                key: col.key().to_string(),
                label: col.header().to_string(),
                sortable: col.is_sortable(),
                indicator: (col.is_sortable() && sort.is_active(col.effective_sort_key()))
                    .then(|| sort.order.indicator().to_string()),
            })
            .collect();

        let actions = table.has_actions();
        let row_actions = build_row_actions(table);

        let body = if view.rows.is_empty() {
            Body::Empty {
                message: NO_DATA_MESSAGE.to_string(),
                colspan: table.column_span(),
            }
        } else {
            Body::Rows {
                rows: view
                    .rows
                    .iter()
                    .map(|row| RenderedRow {
                        cells: table.columns().iter().map(|col| col.cell(row)).collect(),
                        actions: row_actions.clone(),
                    })
                    .collect(),
            }
        };

        let pagination = &view.pagination;
        let footer = Footer {
            showing: format!(
                "Showing {} to {} of {} entries",
                pagination.first_shown(view.rows.len()),
                pagination.last_shown(),
                pagination.total_items
            ),
            page: pagination.page,
            total_pages: pagination.display_total_pages(),
            page_size: pagination.page_size,
            page_size_options: table.page_size_options().to_vec(),
            prev_enabled: pagination.has_prev(),
            next_enabled: pagination.has_next(),
        };

        RenderedTable {
            filter: table.is_filterable().then(|| table.filter().to_string()),
            headers,
            actions,
            body,
            footer,
        }
    }

    /// Header labels with the sort indicator appended, in column order
    pub fn header_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .headers
            .iter()
            .map(|h| match &h.indicator {
                Some(arrow) => format!("{} {}", h.label, arrow),
                None => h.label.clone(),
            })
            .collect();
        if self.actions {
            labels.push(ACTIONS_HEADER.to_string());
        }
        labels
    }
}

fn build_row_actions<T>(table: &Table<T>) -> Vec<String> {
    let mut actions = Vec::new();
    if table.listeners.edit.is_some() {
        actions.push("Edit".to_string());
    }
    if table.listeners.delete.is_some() {
        actions.push("Delete".to_string());
    }
    actions
}
