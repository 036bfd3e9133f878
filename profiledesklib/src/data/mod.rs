//! Data model: cell values, record field lookup, and client profiles.
//!
//! This module is the first stage of the pipeline - everything downstream
//! (the list query, the table, the rendered output) reads records through
//! the [`Record`] trait and compares them through [`Value`]. It provides:
//!
//! - **Value**: a typed primitive cell value (`Null`, `Bool`, `Number`, `Text`)
//! - **Record**: field lookup by key for any record shape
//! - **Client**: the client profile shown on the admin dashboard
//!
//! ## Example
//!
//! ```rust
//! use profiledesklib::data::{Record, Value};
//! use serde_json::json;
//!
//! let row = json!({ "name": "Amy", "age": null });
//! assert_eq!(row.field("name"), Value::from("Amy"));
//! assert!(row.field("age").is_null());
//! assert!(row.field("missing").is_null());
//! ```

pub mod client;
pub mod record;
pub mod value;

pub use client::{load_clients, Client, ClientUser};
pub use record::Record;
pub use value::Value;
