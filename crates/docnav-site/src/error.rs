//! Navigation build errors.

use docnav_storage::StorageError;

/// Error returned when the navigation tree cannot be built.
///
/// Every variant aborts the build; there is no partial tree.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Storage failed while discovering or reading documents.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Two distinct documents resolve to the same navigation node.
    #[error("Documents {first} and {second} both map to {url_path}")]
    DuplicateDocument {
        /// URL path of the contested node.
        url_path: String,
        /// Document that claimed the node first.
        first: String,
        /// Document that collided with it.
        second: String,
    },
    /// A page would need children, or a page collides with a directory.
    #[error("Document {source_path} conflicts with page/directory at {url_path}")]
    FileHasChildren {
        /// URL path of the page node.
        url_path: String,
        /// Document whose path runs through or onto the page node.
        source_path: String,
    },
}
