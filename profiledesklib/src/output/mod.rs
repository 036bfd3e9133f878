//! Output formatting: present a table view as strings.
//!
//! This module handles the final stage of the pipeline - turning a
//! [`TableView`](crate::table::TableView) into display-ready data. It provides:
//!
//! - **RenderedTable**: headers with sort indicators, body, and pagination footer
//! - **Body**: data rows, or a single "no data" row spanning every column
//!
//! RenderedTable is a pure presentation layer - it only formats data into strings.
//! All filtering, sorting, and paging happens in the table stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use profiledesklib::output::RenderedTable;
//!
//! let rendered = RenderedTable::from_view(&table, &table.view(&clients));
//! // rendered.headers: [HeaderCell { label: "Name", indicator: Some("↑"), .. }, ...]
//! // rendered.footer.showing: "Showing 1 to 10 of 42 entries"
//! ```

pub mod table;

pub use table::{
    Body, Footer, HeaderCell, RenderedRow, RenderedTable, ACTIONS_HEADER, NO_DATA_MESSAGE,
};
