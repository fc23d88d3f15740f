//! Version identifiers and their numeric ordering keys.
//!
//! Survey documents are named after the library version they were produced
//! against (`v1.20.0.json`). Ordering is numeric per component, so `v1.9.0`
//! sorts before `v1.10.0`.

use crate::errors::{Result, SurveyError};
use std::cmp::Ordering;
use std::fmt;

/// Numeric ordering key extracted from a version identifier.
///
/// Components compare left to right; a shorter key that is a prefix of a
/// longer one sorts first (`v1.0` < `v1.0.0`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Parse `vMAJOR.MINOR.PATCH[...]` into its numeric components.
    ///
    /// A single leading `v` is optional. Every dot-separated component must
    /// be a non-negative integer; pre-release suffixes such as `0-rc1` are
    /// rejected with [`SurveyError::InvalidVersion`].
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.strip_prefix('v').unwrap_or(input);
        if trimmed.is_empty() {
            return Err(SurveyError::invalid_version(input, ""));
        }

        trimmed
            .split('.')
            .map(|component| parse_component(input, component))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    pub fn major(&self) -> Option<u64> {
        self.0.first().copied()
    }
}

fn parse_component(input: &str, component: &str) -> Result<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SurveyError::invalid_version(input, component));
    }
    component
        .parse::<u64>()
        .map_err(|_| SurveyError::invalid_version(input, component))
}

/// A surveyed version: the identifier as written plus its ordering key.
///
/// Equality and ordering only consider the key, so `v1.02.0` and `v1.2.0`
/// compare equal. Collections of versions are never deduplicated on that
/// basis; both documents are kept.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    key: VersionKey,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            raw: input.to_string(),
            key: VersionKey::parse(input)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> &VersionKey {
        &self.key
    }

    /// Column label with `prefix` removed, falling back to the full identifier.
    pub fn short_label(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            return self.raw.clone();
        }
        match self.raw.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => self.raw.clone(),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Shared `v<major>.` prefix for column labels, empty when versions span
/// several majors.
pub fn common_major_prefix(versions: &[Version]) -> String {
    let mut majors = versions.iter().map(|v| v.key().major());
    let first = match majors.next() {
        Some(Some(major)) => major,
        _ => return String::new(),
    };

    let shared = majors.all(|m| m == Some(first))
        && versions.iter().all(|v| v.key().components().len() > 1);
    if shared {
        format!("v{first}.")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_numeric_not_lexicographic_ordering() {
        assert!(v("v1.9.0") < v("v1.10.0"));
        assert!(v("v1.10.0") < v("v2.0.0"));
    }

    #[test]
    fn test_parse_components() {
        let key = VersionKey::parse("v1.25.12").unwrap();
        assert_eq!(key.components(), &[1, 25, 12]);
        assert_eq!(key.major(), Some(1));
    }

    #[test]
    fn test_parse_without_leading_v() {
        assert_eq!(VersionKey::parse("1.2.3").unwrap().components(), &[1, 2, 3]);
    }

    #[test]
    fn test_prefix_key_sorts_first() {
        assert!(v("v1.0") < v("v1.0.0"));
    }

    #[test]
    fn test_equal_keys_compare_equal() {
        let padded = v("v1.02.0");
        let plain = v("v1.2.0");
        assert_eq!(padded, plain);
        assert_eq!(padded.as_str(), "v1.02.0");
    }

    #[test]
    fn test_rejects_prerelease_suffix() {
        let err = VersionKey::parse("v1.2.0-rc1").unwrap_err();
        match err {
            SurveyError::InvalidVersion { input, component } => {
                assert_eq!(input, "v1.2.0-rc1");
                assert_eq!(component, "0-rc1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_and_signed_components() {
        assert!(VersionKey::parse("v").is_err());
        assert!(VersionKey::parse("v1..0").is_err());
        assert!(VersionKey::parse("v1.-2.0").is_err());
        assert!(VersionKey::parse("v1.+2.0").is_err());
    }

    #[test]
    fn test_short_label() {
        assert_eq!(v("v1.20.0").short_label("v1."), "20.0");
        assert_eq!(v("v1.20.0").short_label(""), "v1.20.0");
        assert_eq!(v("v2.0.0").short_label("v1."), "v2.0.0");
    }

    #[test]
    fn test_common_major_prefix() {
        assert_eq!(common_major_prefix(&[v("v1.0.0"), v("v1.25.0")]), "v1.");
        assert_eq!(common_major_prefix(&[v("v1.0.0"), v("v2.0.0")]), "");
        assert_eq!(common_major_prefix(&[v("v1")]), "");
        assert_eq!(common_major_prefix(&[]), "");
    }
}
