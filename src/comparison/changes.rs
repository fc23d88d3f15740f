//! Adjacent-version change detection.
//!
//! For each pair of consecutive versions, every method in the universe and
//! every tracked field, the earlier and later values are compared. A change
//! is only recorded when both values are known and differ; a value that is
//! absent or unknown on either side never produces a change.

use crate::core::{MethodRecord, SurveyResult, Version};
use crate::io::ResultStore;

/// A field compared across versions.
#[derive(Debug, Clone, Copy)]
pub struct TrackedAttribute<T> {
    pub label: &'static str,
    pub select: fn(&MethodRecord) -> Option<T>,
}

impl<T> TrackedAttribute<T> {
    pub const fn new(label: &'static str, select: fn(&MethodRecord) -> Option<T>) -> Self {
        Self { label, select }
    }
}

/// Boolean purity.
pub const PURITY: TrackedAttribute<bool> = TrackedAttribute::new("pure", |r| r.pure.as_bool());

/// Clone codes of the returned and callback `*gorm.DB`, tracked separately.
pub const CLONE_CODES: [TrackedAttribute<i64>; 2] = [
    TrackedAttribute::new("return_clone", |r| r.return_clone.known()),
    TrackedAttribute::new("callback_clone", |r| r.callback_clone.known()),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub method: String,
    pub field: &'static str,
    pub from: T,
    pub to: T,
    pub direction: Direction,
}

/// All changes between two consecutive versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChanges<T> {
    pub from: Version,
    pub to: Version,
    pub changes: Vec<Change<T>>,
}

impl<T> VersionChanges<T> {
    /// Section heading, `v1.1.0 → v1.2.0`.
    pub fn heading(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }
}

pub struct ChangeDetector<'a> {
    store: &'a ResultStore,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(store: &'a ResultStore) -> Self {
        Self { store }
    }

    /// Changes per adjacent document pair; pairs without changes are left out.
    pub fn detect<T>(&self, fields: &[TrackedAttribute<T>]) -> Vec<VersionChanges<T>>
    where
        T: PartialOrd + Clone,
    {
        self.store
            .results()
            .windows(2)
            .filter_map(|pair| {
                let changes = self.changes_between(&pair[0], &pair[1], fields);
                (!changes.is_empty()).then(|| VersionChanges {
                    from: pair[0].version.clone(),
                    to: pair[1].version.clone(),
                    changes,
                })
            })
            .collect()
    }

    fn changes_between<T>(
        &self,
        from: &SurveyResult,
        to: &SurveyResult,
        fields: &[TrackedAttribute<T>],
    ) -> Vec<Change<T>>
    where
        T: PartialOrd + Clone,
    {
        self.store
            .methods()
            .iter()
            .flat_map(|method| {
                fields.iter().filter_map(move |field| {
                    let before = value(from, method, field)?;
                    let after = value(to, method, field)?;
                    classify(&before, &after).map(|direction| Change {
                        method: method.clone(),
                        field: field.label,
                        from: before,
                        to: after,
                        direction,
                    })
                })
            })
            .collect()
    }
}

fn value<T>(result: &SurveyResult, method: &str, field: &TrackedAttribute<T>) -> Option<T> {
    result
        .method(method)
        .filter(|record| record.exists)
        .and_then(field.select)
}

fn classify<T: PartialOrd>(before: &T, after: &T) -> Option<Direction> {
    if after > before {
        Some(Direction::Rising)
    } else if after < before {
        Some(Direction::Falling)
    } else {
        None
    }
}
