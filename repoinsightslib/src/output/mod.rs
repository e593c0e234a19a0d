//! Output formatting: present a report as a table.
//!
//! This module handles the final stage of the pipeline - picking headline
//! figures out of an [`AggregateReport`](crate::AggregateReport) for display.
//! It provides:
//!
//! - **SummaryTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//!
//! The JSON report itself is the serialized `AggregateReport`; this module
//! only covers the human-readable summary.
//!
//! ## Example
//!
//! ```rust,ignore
//! use repoinsightslib::output::SummaryTable;
//!
//! let table = SummaryTable::from_report(&report);
//! // table.headers: ["Metric", "Value"]
//! // table.rows: [TableRow { label: "Commits", values: ["1234"] }, ...]
//! // table.footer: TableRow { label: "Sections", values: ["20 of 20 collected"] }
//! ```

pub mod table;

pub use table::{SummaryTable, TableRow, UNAVAILABLE};
