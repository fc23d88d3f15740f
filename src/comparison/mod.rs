//! Cross-version comparison of survey results.
//!
//! - [`matrix`]: method × version symbol tables
//! - [`ranges`]: contiguous version ranges with constant values
//! - [`changes`]: transitions between adjacent versions

pub mod changes;
pub mod matrix;
pub mod ranges;

pub use changes::{ChangeDetector, Change, Direction, TrackedAttribute, VersionChanges};
pub use matrix::{AttributeMatrix, MatrixBuilder, MatrixKind, MatrixRow};
pub use ranges::{compress, compress_group, expand, merge, Range};
