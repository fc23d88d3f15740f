//! Typed view of a survey document.
//!
//! Survey documents are loosely typed: any attribute may be missing, `null`,
//! a boolean, a string or an arbitrary integer. Each attribute is read with
//! a best-effort lookup into an explicit tagged value so that "unknown",
//! "absent" and `false`/`0` never collapse into one another.

use crate::core::version::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Three-valued attribute: a JSON boolean, or unknown for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_bool) {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Unknown,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

/// How an impure method mutates its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpureMode {
    /// Repeated calls replace prior state
    Overwrite,
    /// Repeated calls compound
    Accumulate,
    #[default]
    Unknown,
}

impl ImpureMode {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("overwrite") => Self::Overwrite,
            Some("accumulate") => Self::Accumulate,
            _ => Self::Unknown,
        }
    }
}

/// Clone level of a `*gorm.DB`: `-1` unknown, `0` shared, `1` statement
/// clone, `2` full clone. Other integers are carried through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CloneCode {
    #[default]
    Absent,
    Code(i64),
}

impl CloneCode {
    pub const UNKNOWN: i64 = -1;

    pub fn from_json(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_i64)
            .map_or(Self::Absent, Self::Code)
    }

    /// The code, if it is present and not the `-1` unknown marker.
    pub fn known(self) -> Option<i64> {
        match self {
            Self::Code(code) if code != Self::UNKNOWN => Some(code),
            _ => None,
        }
    }
}

/// Attributes recorded per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Exists,
    Pure,
    ImpureMode,
    ImmutableReturn,
    ReturnClone,
    CallbackClone,
    CallbackArgImmutable,
    FinisherPreservesJoins,
}

impl Attribute {
    pub fn key(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Pure => "pure",
            Self::ImpureMode => "impure_mode",
            Self::ImmutableReturn => "immutable_return",
            Self::ReturnClone => "return_clone",
            Self::CallbackClone => "callback_clone",
            Self::CallbackArgImmutable => "callback_arg_immutable",
            Self::FinisherPreservesJoins => "finisher_preserves_joins",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of a single attribute lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// Method, version or attribute missing
    Absent,
    Flag(bool),
    Mode(ImpureMode),
    Code(i64),
}

impl From<TriState> for AttributeValue {
    fn from(state: TriState) -> Self {
        state.as_bool().map_or(Self::Absent, Self::Flag)
    }
}

impl From<CloneCode> for AttributeValue {
    fn from(code: CloneCode) -> Self {
        match code {
            CloneCode::Absent => Self::Absent,
            CloneCode::Code(c) => Self::Code(c),
        }
    }
}

/// Survey outcome for one method in one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodRecord {
    pub exists: bool,
    pub pure: TriState,
    pub impure_mode: ImpureMode,
    pub immutable_return: TriState,
    pub return_clone: CloneCode,
    pub callback_clone: CloneCode,
    pub callback_arg_immutable: TriState,
    pub finisher_preserves_joins: TriState,
    /// Probe failure note left by the survey run
    pub error: Option<String>,
}

impl MethodRecord {
    /// Best-effort read of a method attribute object. Keys with an
    /// unexpected type are treated as missing.
    pub fn from_json(value: &Value) -> Self {
        let get = |key: &str| value.get(key);
        Self {
            exists: get("exists").and_then(Value::as_bool).unwrap_or(false),
            pure: TriState::from_json(get("pure")),
            impure_mode: ImpureMode::from_json(get("impure_mode")),
            immutable_return: TriState::from_json(get("immutable_return")),
            return_clone: CloneCode::from_json(get("return_clone")),
            callback_clone: CloneCode::from_json(get("callback_clone")),
            callback_arg_immutable: TriState::from_json(get("callback_arg_immutable")),
            finisher_preserves_joins: TriState::from_json(get("finisher_preserves_joins")),
            error: get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn value(&self, attribute: Attribute) -> AttributeValue {
        match attribute {
            Attribute::Exists => AttributeValue::Flag(self.exists),
            Attribute::Pure => self.pure.into(),
            Attribute::ImpureMode => match (self.pure, self.impure_mode) {
                (TriState::False, mode) => AttributeValue::Mode(mode),
                _ => AttributeValue::Absent,
            },
            Attribute::ImmutableReturn => self.immutable_return.into(),
            Attribute::ReturnClone => self.return_clone.into(),
            Attribute::CallbackClone => self.callback_clone.into(),
            Attribute::CallbackArgImmutable => self.callback_arg_immutable.into(),
            Attribute::FinisherPreservesJoins => self.finisher_preserves_joins.into(),
        }
    }
}

/// Per-version counts, rendered verbatim in the summary table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveySummary {
    pub total_methods: i64,
    pub pure_methods: i64,
    pub impure_methods: i64,
    pub immutable_count: i64,
}

impl SurveySummary {
    pub fn from_json(value: Option<&Value>) -> Self {
        let count = |key: &str| {
            value
                .and_then(|summary| summary.get(key))
                .and_then(Value::as_i64)
                .unwrap_or(0)
        };
        Self {
            total_methods: count("total_methods"),
            pure_methods: count("pure_methods"),
            impure_methods: count("impure_methods"),
            immutable_count: count("immutable_count"),
        }
    }
}

/// One survey document.
#[derive(Debug, Clone)]
pub struct SurveyResult {
    pub version: Version,
    /// Library version reported by the survey run itself
    pub gorm_version: Option<String>,
    pub methods: BTreeMap<String, MethodRecord>,
    pub summary: SurveySummary,
}

impl SurveyResult {
    pub fn from_json(version: Version, document: &Value) -> Self {
        let methods = document
            .get("methods")
            .and_then(Value::as_object)
            .map(|methods| {
                methods
                    .iter()
                    .map(|(name, record)| (name.clone(), MethodRecord::from_json(record)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            version,
            gorm_version: document
                .get("gorm_version")
                .and_then(Value::as_str)
                .map(str::to_string),
            methods,
            summary: SurveySummary::from_json(document.get("summary")),
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodRecord> {
        self.methods.get(name)
    }

    /// Attribute of `method` in this document; [`AttributeValue::Absent`]
    /// when the method is not listed or has `exists = false`.
    pub fn attribute(&self, method: &str, attribute: Attribute) -> AttributeValue {
        self.method(method)
            .filter(|record| record.exists)
            .map_or(AttributeValue::Absent, |record| record.value(attribute))
    }
}
