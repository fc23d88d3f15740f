//! Report output.
//!
//! - [`markdown`]: the report renderer and its section order
//! - [`formatters`]: Markdown table and list helpers

pub mod formatters;
pub mod markdown;

pub use formatters::*;
pub use markdown::*;
