//! CLI command implementations.
//!
//! The tool has a single command: render the survey report for a directory
//! of per-version results.

pub mod report;

pub use report::{generate_report, handle_report, ReportOptions};
