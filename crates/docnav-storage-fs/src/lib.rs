//! Filesystem storage implementation for the docnav documentation site builder.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](docnav_storage::Storage) trait. It handles:
//!
//! - Markdown discovery by globbing `**/*.md` under the source directory
//! - Deterministic (lexicographic) ordering of discovered paths
//! - Path validation for reads (no escaping the source directory)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docnav_storage::Storage;
//! use docnav_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for path in storage.scan()? {
//!     println!("{path}");
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use docnav_storage::{Storage, StorageError, StorageErrorKind};
use glob::{MatchOptions, Pattern};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Glob pattern for markdown documents, relative to the source directory.
const MARKDOWN_PATTERN: &str = "**/*.md";

/// Filesystem storage implementation.
///
/// Discovers markdown files below a source directory and reads them on demand.
/// Document paths are `/`-separated and relative to the source directory.
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// `source_dir` without `.` components, as glob reports matches.
    match_root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let match_root = without_cur_dir(&source_dir);
        Self {
            source_dir,
            match_root,
        }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a document path doesn't escape the source directory.
    ///
    /// Rejects paths containing parent directory components (`..`) or
    /// absolute roots.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let escapes = Path::new(path).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Convert an absolute match back into a `/`-separated document path.
    ///
    /// Returns `None` for paths outside the source directory, hidden
    /// components, or non UTF-8 names.
    fn document_path(&self, full_path: &Path) -> Option<String> {
        let full_path = without_cur_dir(full_path);
        let rel_path = full_path.strip_prefix(&self.match_root).ok()?;
        let mut segments = Vec::new();
        for component in rel_path.components() {
            let Component::Normal(name) = component else {
                return None;
            };
            let Some(name) = name.to_str() else {
                tracing::warn!(path = %full_path.display(), "Skipping non UTF-8 document path");
                return None;
            };
            if name.starts_with('.') {
                return None;
            }
            segments.push(name);
        }
        Some(segments.join("/"))
    }
}

/// Drop `.` components; glob strips a leading `./` from relative matches.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        if !self.source_dir.is_dir() {
            tracing::debug!(dir = %self.source_dir.display(), "Source directory missing, nothing to scan");
            return Ok(Vec::new());
        }

        let root = Pattern::escape(&self.source_dir.to_string_lossy());
        let pattern = format!("{}/{MARKDOWN_PATTERN}", root.trim_end_matches('/'));
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let entries = glob::glob_with(&pattern, options).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(&self.source_dir)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let full_path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                StorageError::io(io::Error::from(e), Some(path)).with_backend(BACKEND)
            })?;
            if !full_path.is_file() {
                continue;
            }
            if let Some(path) = self.document_path(&full_path) {
                paths.push(path);
            }
        }

        // Glob order depends on directory iteration; fix it so sibling
        // insertion order is reproducible across runs.
        paths.sort();
        paths.dedup();

        tracing::debug!(count = paths.len(), "Scanned documents");
        Ok(paths)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.source_dir.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.source_dir.join(path).is_file()
    }
}
