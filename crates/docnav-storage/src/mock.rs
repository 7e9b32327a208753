//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents in memory. `scan()` returns paths in insertion order,
/// which lets tests control discovery order explicitly.
///
/// # Example
///
/// ```ignore
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_document("index.md", "# Home")
///     .with_document("guides/setup.md", "---\ntitle: Setup Guide\n---\n");
///
/// let paths = storage.scan().unwrap();
/// let content = storage.read("guides/setup.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    order: Vec<String>,
    contents: BTreeMap<String, String>,
    unreadable: Vec<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given path and content.
    ///
    /// Adding the same path twice replaces the content but keeps the
    /// first discovery position.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        if self.contents.insert(path.clone(), content.into()).is_none() {
            self.order.push(path);
        }
        self
    }

    /// Mark a document as existing but failing on read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.order.push(path.clone());
        self.unreadable.push(path);
        self
    }

    fn is_unreadable(&self, path: &str) -> bool {
        self.unreadable.iter().any(|p| p == path)
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.order.clone())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.is_unreadable(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.contains_key(path) || self.is_unreadable(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scan_returns_insertion_order() {
        let storage = MockStorage::new()
            .with_document("b.md", "")
            .with_document("a.md", "")
            .with_document("c/index.md", "");

        assert_eq!(storage.scan().unwrap(), vec!["b.md", "a.md", "c/index.md"]);
    }

    #[test]
    fn test_with_document_twice_keeps_position() {
        let storage = MockStorage::new()
            .with_document("a.md", "first")
            .with_document("b.md", "")
            .with_document("a.md", "second");

        assert_eq!(storage.scan().unwrap(), vec!["a.md", "b.md"]);
        assert_eq!(storage.read("a.md").unwrap(), "second");
    }

    #[test]
    fn test_read_missing_returns_not_found() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_mock_storage_is_send_sync() {
        static_assertions::assert_impl_all!(MockStorage: Send, Sync);
    }

    #[test]
    fn test_exists() {
        let storage = MockStorage::new().with_document("guide.md", "# Guide");

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("other.md"));
    }

    #[test]
    fn test_unreadable_exists_but_fails_read() {
        let storage = MockStorage::new().with_unreadable("locked.md");

        assert!(storage.exists("locked.md"));
        let err = storage.read("locked.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }
}
