pub mod types;
pub mod version;

pub use types::{
    Attribute, AttributeValue, CloneCode, ImpureMode, MethodRecord, SurveyResult, SurveySummary,
    TriState,
};
pub use version::{common_major_prefix, Version, VersionKey};
