//! Storage abstraction for the docnav documentation site builder.
//!
//! This crate provides a [`Storage`] trait for abstracting document discovery and
//! content retrieval from the underlying backend. The navigation builder only
//! ever talks to a `Storage`, so it can be tested without touching the real
//! filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `docnav-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use docnav_storage::Storage;
//!
//! let paths = storage.scan()?;
//! for path in paths {
//!     println!("{path}");
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
