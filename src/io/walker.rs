use crate::errors::{Result, SurveyError};
use std::path::{Path, PathBuf};

/// File name pattern of a survey document (`v1.20.0.json`)
pub const DOCUMENT_PATTERN: &str = "v*.json";

pub struct DocumentWalker {
    root: PathBuf,
}

impl DocumentWalker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// List matching regular files directly under the root, in path order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{}/{}", root.trim_end_matches('/'), DOCUMENT_PATTERN);

        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                SurveyError::io(path, e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

pub fn find_version_documents(root: &Path) -> Result<Vec<PathBuf>> {
    DocumentWalker::new(root.to_path_buf()).walk()
}

/// Version identifier of a document: its file stem.
pub fn document_version(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
