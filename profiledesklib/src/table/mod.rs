//! Table component: filtering, sorting and pagination state.
//!
//! This module is the core of the crate. A [`Table`] runs in one of two modes:
//!
//! - **Uncontrolled**: it receives the full dataset and filters, sorts and
//!   slices it in memory.
//! - **Controlled**: the caller supplies a total item count and the current
//!   page of already filtered/sorted rows; the table only renders them and
//!   reports user intent through listeners.
//!
//! Filter text and sort state are each held in a [`StateSource`], so the
//! table may own one property while the caller drives another.
//!
//! ## Example
//!
//! ```rust
//! use profiledesklib::table::{Column, SortOrder, TableOptions};
//! use serde_json::json;
//!
//! let data = vec![
//!     json!({ "name": "Bob", "age": 30 }),
//!     json!({ "name": "Amy", "age": null }),
//!     json!({ "name": "Cid", "age": 25 }),
//! ];
//! let mut table = TableOptions::new(vec![
//!     Column::new("name", "Name"),
//!     Column::new("age", "Age"),
//! ])
//! .build()
//! .unwrap();
//!
//! table.toggle_sort("age");
//! assert_eq!(table.sort().order, SortOrder::Ascending);
//!
//! let view = table.view(&data);
//! let names: Vec<&str> = view.rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
//! assert_eq!(names, ["Cid", "Bob", "Amy"]);
//! ```

pub mod column;
pub mod options;
pub mod sort;
pub mod source;
pub mod state;
pub mod view;

pub use column::{Accessor, Column, Renderer};
pub use options::{TableOptions, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
pub use sort::{compare_nulls_last, SortOrder, SortState};
pub use source::StateSource;
pub use state::{Table, TableAction, TableMode};
pub use view::{filter_rows, page_rows, sort_rows, Pagination, TableView};
