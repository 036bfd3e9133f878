//! Query processing: search, order and page client profiles.
//!
//! This module is the list endpoint behind a controlled table. It provides:
//!
//! - **Options**: `ClientQuery`, parsed from the dashboard's query-string pairs
//! - **List**: `list_clients` returning one `ClientPage` plus its `PageInfo`
//!
//! ## Example
//!
//! ```rust,ignore
//! use profiledesklib::query::{list_clients, ClientQuery};
//!
//! let query = ClientQuery::from_pairs([("page", "2"), ("search", "tamil")])?;
//! let page = list_clients(&clients, &query, today);
//! println!("{} of {} clients", page.clients.len(), page.pagination.total);
//! ```

pub mod list;
pub mod options;

pub use list::{find_client, list_clients, ClientPage, PageInfo};
pub use options::{ClientQuery, ClientSort};
