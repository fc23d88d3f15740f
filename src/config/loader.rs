use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::core::ReportConfig;
use crate::errors::{Result, SurveyError};

/// File name searched for when no `--config` is given
pub const CONFIG_FILE_NAME: &str = ".purity-report.toml";

/// Read the raw contents of a config file
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<ReportConfig, String> {
    let config = toml::from_str::<ReportConfig>(contents)
        .map_err(|e| format!("Failed to parse report config: {}", e))?;

    for group in &config.range_groups {
        if group.title.trim().is_empty() {
            return Err("Range group with an empty title".to_string());
        }
        if group.fields.is_empty() {
            return Err(format!("Range group '{}' tracks no fields", group.title));
        }
    }

    Ok(config)
}

/// Load a config file given explicitly by the operator; any failure is fatal.
pub fn load_config_from(path: &Path) -> Result<ReportConfig> {
    let contents = read_config_file(path).map_err(|e| SurveyError::io(path, e))?;
    let config =
        parse_and_validate_config(&contents).map_err(|message| SurveyError::config(path, message))?;
    debug!(path = %path.display(), "Loaded report config");
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub(crate) fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Try loading a discovered config file; unreadable or invalid files are
/// skipped with a warning.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ReportConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %config_path.display(), error = %e, "Failed to read config file");
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!(path = %config_path.display(), "Loaded report config");
            Some(config)
        }
        Err(e) => {
            warn!(path = %config_path.display(), "{}. Using defaults.", e);
            None
        }
    }
}

/// Resolve the report configuration: an explicit file, else the nearest
/// `.purity-report.toml` above `start`, else the built-in defaults.
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<ReportConfig> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    if let Some(path) = explicit {
        return load_config_from(path);
    }

    Ok(directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!("No report config found. Using default config.");
            ReportConfig::default()
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Attribute;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.range_groups.len(), 2);
    }

    #[test]
    fn test_custom_range_group() {
        let config = parse_and_validate_config(indoc! {r#"
            title = "Survey"

            [[range_groups]]
            title = "Transaction clone values"
            fields = [
                { method = "Transaction", attribute = "callback_clone" },
                { method = "Begin", attribute = "return_clone", label = "begin" },
            ]
        "#})
        .unwrap();

        assert_eq!(config.title, "Survey");
        assert_eq!(config.generator, "gorm-purity-survey");
        let group = &config.range_groups[0];
        assert_eq!(group.fields[0].attribute, Attribute::CallbackClone);
        assert_eq!(group.fields[0].header(), "Transaction");
        assert_eq!(group.fields[1].header(), "begin");
    }

    #[test]
    fn test_group_without_fields_is_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [[range_groups]]
            title = "Nothing"
            fields = []
        "#})
        .unwrap_err();
        assert!(err.contains("Nothing"));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let result = parse_and_validate_config(indoc! {r#"
            [[range_groups]]
            title = "Bad"
            fields = [{ method = "Where", attribute = "colour" }]
        "#});
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, SurveyError::Io { .. }));
    }

    #[test]
    fn test_discovers_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "generator = \"survey-ci\"\n").unwrap();

        let config = load_config(None, &nested).unwrap();
        assert_eq!(config.generator, "survey-ci");
    }

    #[test]
    fn test_directory_ancestors_depth() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
