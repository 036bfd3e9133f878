//! # profiledesklib
//!
//! Filterable, sortable, paginated tables over client profiles, with both
//! in-memory and server-driven state.
//!
//! ## Overview
//!
//! The admin dashboard of a matrimonial-profile service lists registered
//! clients in a generic data table. This library holds the logic behind
//! that table, independent of any UI toolkit:
//!
//! - **Data**: typed cell values, field lookup for any record shape, and the
//!   client profile model
//! - **Query**: the client list endpoint (search, ordering, page window)
//! - **Table**: the filter/sort/pagination state reducer, in controlled or
//!   uncontrolled mode
//! - **Output**: presentation-ready headers, cells and pagination footer
//!
//! ## Features
//!
//! - **Explicit state ownership**: each property is `Owned` or `External`
//! - **Nulls last**: missing values sort after defined ones in both directions
//! - **Pure views**: rendering never mutates state
//! - **Pure Rust data types**: returns structured data, no I/O side effects
//!   beyond [`load_clients`]
//!
//! ## Example
//!
//! ```rust
//! use profiledesklib::{Column, RenderedTable, TableOptions};
//! use serde_json::json;
//!
//! let data = vec![
//!     json!({ "name": "Amy" }),
//!     json!({ "name": "Sam" }),
//!     json!({ "name": "Bob" }),
//! ];
//! let mut table = TableOptions::new(vec![Column::new("name", "Name")])
//!     .filterable(true)
//!     .build()
//!     .unwrap();
//!
//! table.set_filter("am");
//! let view = table.view(&data);
//! assert_eq!(view.rows.len(), 2);
//!
//! let rendered = RenderedTable::from_view(&table, &view);
//! assert_eq!(rendered.footer.showing, "Showing 1 to 2 of 2 entries");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod table;

pub use data::{load_clients, Client, ClientUser, Record, Value};
pub use error::ProfileDeskError;
pub use output::{Body, Footer, HeaderCell, RenderedRow, RenderedTable};
pub use query::{find_client, list_clients, ClientPage, ClientQuery, ClientSort, PageInfo};
pub use table::{
    Column, Pagination, SortOrder, SortState, StateSource, Table, TableAction, TableMode,
    TableOptions, TableView,
};

/// Result type for profiledesklib operations
pub type Result<T> = std::result::Result<T, ProfileDeskError>;
