use crate::core::Attribute;
use serde::{Deserialize, Serialize};

/// Input directory used when none is given on the command line
pub const DEFAULT_INPUT_DIR: &str = "purity";

/// Root configuration structure for the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Document title
    pub title: String,

    /// Type named in the introduction and legend
    pub subject: String,

    /// Name in the trailing signature line
    pub generator: String,

    /// Tables of version ranges over which a group of fields holds constant
    pub range_groups: Vec<RangeGroup>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "GORM Purity Survey Results".to_string(),
            subject: "*gorm.DB".to_string(),
            generator: "gorm-purity-survey".to_string(),
            range_groups: default_range_groups(),
        }
    }
}

/// A set of fields tracked together as one value tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeGroup {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub fields: Vec<TrackedField>,
}

/// One `(method, attribute)` column of a range table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedField {
    pub method: String,
    pub attribute: Attribute,
    /// Column header; defaults to the method name
    #[serde(default)]
    pub label: Option<String>,
}

impl TrackedField {
    pub fn new(method: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            method: method.into(),
            attribute,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn header(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.method)
    }
}

pub fn default_range_groups() -> Vec<RangeGroup> {
    vec![
        RangeGroup {
            title: "Session/Begin Clone Value Swap".to_string(),
            description: Some(
                "Clone value of the `*gorm.DB` returned by `Session` and `Begin`:".to_string(),
            ),
            fields: vec![
                TrackedField::new("Session", Attribute::ReturnClone),
                TrackedField::new("Begin", Attribute::ReturnClone),
            ],
        },
        RangeGroup {
            title: "Scopes Clone Value Changes".to_string(),
            description: Some(
                "Clone value of the `*gorm.DB` returned by `Scopes` and passed to its callbacks:"
                    .to_string(),
            ),
            fields: vec![
                TrackedField::new("Scopes", Attribute::ReturnClone).with_label("return_clone"),
                TrackedField::new("Scopes", Attribute::CallbackClone).with_label("callback_clone"),
            ],
        },
    ]
}
