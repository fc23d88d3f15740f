//! Loading and indexing of per-version survey documents.
//!
//! The store is built once per run and never mutated afterwards. Documents
//! are kept in ascending version order regardless of how the file system
//! enumerated them.

use crate::core::{Attribute, AttributeValue, MethodRecord, SurveyResult, Version};
use crate::errors::{Result, SurveyError};
use crate::io::walker::{document_version, find_version_documents};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    results: Vec<SurveyResult>,
    methods: Vec<String>,
}

impl ResultStore {
    /// Load every `v*.json` document in `dir`.
    ///
    /// Fails on the first unreadable or malformed document; a partial
    /// survey would misrepresent that version.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SurveyError::NotADirectory(dir.to_path_buf()));
        }

        let files = find_version_documents(dir)?;
        if files.is_empty() {
            return Err(SurveyError::NoDocuments(dir.to_path_buf()));
        }
        info!(dir = %dir.display(), documents = files.len(), "Loading survey results");

        let results = files
            .iter()
            .map(|path| load_document(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_results(results))
    }

    /// Build a store from already parsed documents.
    pub fn from_results(mut results: Vec<SurveyResult>) -> Self {
        // Stable: documents with equal keys keep their input order.
        results.sort_by(|a, b| a.version.cmp(&b.version));

        let methods = results
            .iter()
            .flat_map(|result| result.methods.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self { results, methods }
    }

    pub fn versions(&self) -> Vec<&Version> {
        self.results.iter().map(|result| &result.version).collect()
    }

    /// Union of method names across all documents, alphabetical.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn results(&self) -> &[SurveyResult] {
        &self.results
    }

    /// Document for `version`, matched on the identifier as written so
    /// that equal-key versions (`v1.2.0`, `v1.02.0`) stay distinct.
    pub fn result(&self, version: &Version) -> Option<&SurveyResult> {
        self.results
            .iter()
            .find(|result| result.version.as_str() == version.as_str())
    }

    pub fn record(&self, version: &Version, method: &str) -> Option<&MethodRecord> {
        self.result(version).and_then(|result| result.method(method))
    }

    /// Attribute of `method` in `version`; [`AttributeValue::Absent`] when
    /// the version, the method or the attribute is missing, or the method
    /// does not exist in that version.
    pub fn lookup(&self, version: &Version, method: &str, attribute: Attribute) -> AttributeValue {
        self.result(version)
            .map_or(AttributeValue::Absent, |result| result.attribute(method, attribute))
    }

    /// Methods for which `selector` yields a value in at least one version.
    pub fn methods_with<T>(&self, selector: impl Fn(&MethodRecord) -> Option<T>) -> Vec<String> {
        self.methods
            .iter()
            .filter(|method| {
                self.results.iter().any(|result| {
                    result
                        .method(method)
                        .is_some_and(|record| selector(record).is_some())
                })
            })
            .cloned()
            .collect()
    }
}

fn load_document(path: &Path) -> Result<SurveyResult> {
    let stem = document_version(path).unwrap_or_default();
    let version = Version::parse(stem)?;

    let contents = fs::read_to_string(path).map_err(|e| SurveyError::io(path, e))?;
    let document: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| SurveyError::json(path, e))?;

    let result = SurveyResult::from_json(version, &document);
    debug!(
        path = %path.display(),
        methods = result.methods.len(),
        gorm_version = result.gorm_version.as_deref().unwrap_or("unknown"),
        "Loaded survey document"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TriState;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, value: serde_json::Value) {
        fs::write(dir.join(name), value.to_string()).unwrap();
    }

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "v1.10.0.json",
            json!({ "methods": { "Where": { "exists": true, "pure": false } } }),
        );
        write(
            dir.path(),
            "v1.9.0.json",
            json!({ "methods": {
                "Where": { "exists": true, "pure": true },
                "Joins": { "exists": true, "immutable_return": true }
            } }),
        );
        dir
    }

    #[test]
    fn test_versions_sorted_numerically() {
        let dir = sample_dir();
        let store = ResultStore::load(dir.path()).unwrap();
        let versions: Vec<_> = store.versions().iter().map(|v| v.as_str()).collect();
        assert_eq!(versions, vec!["v1.9.0", "v1.10.0"]);
    }

    #[test]
    fn test_methods_are_union_alphabetical() {
        let dir = sample_dir();
        let store = ResultStore::load(dir.path()).unwrap();
        assert_eq!(store.methods(), &["Joins".to_string(), "Where".to_string()]);
    }

    #[test]
    fn test_lookup_absent_sentinel() {
        let dir = sample_dir();
        let store = ResultStore::load(dir.path()).unwrap();
        let newer = Version::parse("v1.10.0").unwrap();
        let older = Version::parse("v1.9.0").unwrap();

        assert_eq!(store.lookup(&newer, "Where", Attribute::Pure), AttributeValue::Flag(false));
        assert_eq!(store.lookup(&newer, "Joins", Attribute::Pure), AttributeValue::Absent);
        assert_eq!(
            store.lookup(&older, "Joins", Attribute::ImmutableReturn),
            AttributeValue::Flag(true)
        );
        assert_eq!(
            store.lookup(&Version::parse("v2.0.0").unwrap(), "Where", Attribute::Pure),
            AttributeValue::Absent
        );
    }

    #[test]
    fn test_methods_with_attribute() {
        let dir = sample_dir();
        let store = ResultStore::load(dir.path()).unwrap();
        let methods = store.methods_with(|record| record.immutable_return.as_bool());
        assert_eq!(methods, vec!["Joins".to_string()]);
        assert!(store.methods_with(|record| record.callback_clone.known()).is_empty());
    }

    #[test]
    fn test_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("v1.0.0.json");
        fs::write(&file, "{}").unwrap();

        let err = ResultStore::load(&file).unwrap_err();
        assert!(matches!(err, SurveyError::NotADirectory(_)));
    }

    #[test]
    fn test_no_documents() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# results").unwrap();

        let err = ResultStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, SurveyError::NoDocuments(_)));
    }

    #[test]
    fn test_malformed_document_aborts_with_path() {
        let dir = sample_dir();
        fs::write(dir.path().join("v1.11.0.json"), "{ not json").unwrap();

        let err = ResultStore::load(dir.path()).unwrap_err();
        match err {
            SurveyError::Json { path, .. } => assert!(path.ends_with("v1.11.0.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_stem_is_fatal() {
        let dir = sample_dir();
        write(dir.path(), "v1.12.0-rc1.json", json!({}));

        let err = ResultStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidVersion { .. }));
    }

    #[test]
    fn test_equal_keys_resolve_by_identifier() {
        let store = ResultStore::from_results(vec![
            SurveyResult::from_json(
                Version::parse("v1.2.0").unwrap(),
                &json!({ "methods": { "Where": { "exists": true, "pure": true } } }),
            ),
            SurveyResult::from_json(
                Version::parse("v1.02.0").unwrap(),
                &json!({ "methods": { "Where": { "exists": true, "pure": false } } }),
            ),
        ]);
        let padded = Version::parse("v1.02.0").unwrap();

        assert_eq!(store.result(&padded).unwrap().version.as_str(), "v1.02.0");
        assert_eq!(store.record(&padded, "Where").unwrap().pure, TriState::False);
        assert_eq!(
            store.lookup(&padded, "Where", Attribute::Pure),
            AttributeValue::Flag(false)
        );
    }

    #[test]
    fn test_lookup_absent_when_method_does_not_exist() {
        let store = ResultStore::from_results(vec![SurveyResult::from_json(
            Version::parse("v1.0.0").unwrap(),
            &json!({ "methods": { "Session": { "exists": false, "return_clone": 2 } } }),
        )]);
        let version = Version::parse("v1.0.0").unwrap();

        assert!(store.record(&version, "Session").is_some());
        assert_eq!(
            store.lookup(&version, "Session", Attribute::ReturnClone),
            AttributeValue::Absent
        );
    }
}
