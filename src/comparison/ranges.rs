//! State-range compression.
//!
//! Collapses a per-version sequence of values into maximal runs of
//! consecutive versions sharing the same value. The value is any
//! `PartialEq` type; range groups use a tuple of attribute values so new
//! groups of fields need no new traversal code.

use crate::config::RangeGroup;
use crate::core::{AttributeValue, Version};
use crate::io::ResultStore;

/// A maximal run of versions, `start..=end`, holding `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range<V> {
    pub start: Version,
    pub end: Version,
    pub value: V,
}

impl<V> Range<V> {
    pub fn single(version: Version, value: V) -> Self {
        Self {
            start: version.clone(),
            end: version,
            value,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start.as_str() == self.end.as_str()
    }

    /// `v1.0.0 ~ v1.1.0`, or just `v1.2.0` for a one-version range.
    pub fn label(&self) -> String {
        if self.is_single() {
            self.start.to_string()
        } else {
            format!("{} ~ {}", self.start, self.end)
        }
    }
}

/// Compress an ordered `(version, value)` sequence in one pass.
pub fn compress<V, I>(sequence: I) -> Vec<Range<V>>
where
    V: PartialEq,
    I: IntoIterator<Item = (Version, V)>,
{
    merge(
        sequence
            .into_iter()
            .map(|(version, value)| Range::single(version, value)),
    )
}

/// Merge adjacent ranges holding equal values. Idempotent.
pub fn merge<V, I>(ranges: I) -> Vec<Range<V>>
where
    V: PartialEq,
    I: IntoIterator<Item = Range<V>>,
{
    ranges.into_iter().fold(Vec::new(), |mut merged, range| {
        match merged.last_mut() {
            Some(current) if current.value == range.value => current.end = range.end,
            _ => merged.push(range),
        }
        merged
    })
}

/// Rebuild the per-version sequence covered by `ranges`.
///
/// `versions` must be the ordered version list the ranges were compressed
/// from; each range covers the versions from its start through its end.
pub fn expand<V: Clone>(ranges: &[Range<V>], versions: &[Version]) -> Vec<(Version, V)> {
    let mut remaining = versions.iter();
    let mut expanded = Vec::with_capacity(versions.len());

    for range in ranges {
        let mut started = false;
        for version in remaining.by_ref() {
            if !started && version.as_str() != range.start.as_str() {
                continue;
            }
            started = true;
            expanded.push((version.clone(), range.value.clone()));
            if version.as_str() == range.end.as_str() {
                break;
            }
        }
    }

    expanded
}

/// Value tuple of a range group in every document, compressed.
pub fn compress_group(store: &ResultStore, group: &RangeGroup) -> Vec<Range<Vec<AttributeValue>>> {
    compress(store.results().iter().map(|result| {
        let values = group
            .fields
            .iter()
            .map(|field| result.attribute(&field.method, field.attribute))
            .collect();
        (result.version.clone(), values)
    }))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn numbered_versions(count: usize) -> Vec<Version> {
        (0..count)
            .map(|minor| Version::parse(&format!("v1.{minor}.0")).unwrap())
            .collect()
    }

    proptest! {
        /// Property: expanding the ranges reconstructs the original sequence.
        #[test]
        fn expand_reconstructs_sequence(values in prop::collection::vec(0i64..3, 0..40)) {
            let versions = numbered_versions(values.len());
            let original: Vec<_> = versions.iter().cloned().zip(values.iter().copied()).collect();

            let ranges = compress(original.clone());
            let expanded = expand(&ranges, &versions);

            prop_assert_eq!(expanded.len(), original.len());
            for ((ev, evalue), (ov, ovalue)) in expanded.iter().zip(original.iter()) {
                prop_assert_eq!(ev.as_str(), ov.as_str());
                prop_assert_eq!(evalue, ovalue);
            }
        }

        /// Property: compressing an already compressed sequence changes nothing.
        #[test]
        fn merge_is_idempotent(values in prop::collection::vec(0i64..3, 0..40)) {
            let versions = numbered_versions(values.len());
            let once = compress(versions.into_iter().zip(values));
            let twice = merge(once.clone());
            prop_assert_eq!(once, twice);
        }

        /// Property: adjacent ranges never share a value.
        #[test]
        fn adjacent_ranges_differ(values in prop::collection::vec(0i64..3, 0..40)) {
            let versions = numbered_versions(values.len());
            let ranges = compress(versions.into_iter().zip(values));
            for pair in ranges.windows(2) {
                prop_assert_ne!(pair[0].value, pair[1].value);
            }
        }
    }
}
