//! Report configuration.
//!
//! Everything has a built-in default; a TOML file (`--config`, or the
//! nearest `.purity-report.toml`) can retitle the report and add or replace
//! the tracked range groups.

mod core;
mod loader;

pub use self::core::{
    default_range_groups, RangeGroup, ReportConfig, TrackedField, DEFAULT_INPUT_DIR,
};
pub use loader::{load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME};
