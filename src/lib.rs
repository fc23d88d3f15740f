// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod output;

// Re-export commonly used types
pub use crate::core::{
    Attribute, AttributeValue, CloneCode, ImpureMode, MethodRecord, SurveyResult, SurveySummary,
    TriState, Version, VersionKey,
};

pub use crate::comparison::{
    compress, compress_group, expand, merge, AttributeMatrix, Change, ChangeDetector, Direction,
    MatrixBuilder, MatrixKind, Range, TrackedAttribute, VersionChanges,
};

pub use crate::config::{RangeGroup, ReportConfig, TrackedField};
pub use crate::errors::SurveyError;
pub use crate::formatting::{EmojiMode, SymbolSet};
pub use crate::io::ResultStore;
pub use crate::output::{render_report, ReportRenderer};
