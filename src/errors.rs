//! Error types for loading survey results and building reports.
//!
//! Only a handful of conditions are fatal: an input path that is not a
//! directory, a directory without version documents, a document stem that
//! is not a version, and a document that cannot be read or parsed. Every
//! other anomaly in the survey data degrades to an "absent" value and is
//! rendered rather than raised.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for purity report operations
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The configured input path does not resolve to a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The input directory holds no `v*.json` documents
    #[error("No JSON files found in {}", .0.display())]
    NoDocuments(PathBuf),

    /// A version identifier with an empty or non-numeric component
    #[error("Invalid version '{input}': component '{component}' is not a non-negative integer")]
    InvalidVersion { input: String, component: String },

    /// Reading a document failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON
    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Report configuration could not be loaded
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Document discovery pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl SurveyError {
    /// Create an invalid version error for the offending component
    pub fn invalid_version(input: impl Into<String>, component: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            component: component.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error with path context
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error with path context
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using SurveyError
pub type Result<T> = std::result::Result<T, SurveyError>;
