//! Navigation tree building for docnav.
//!
//! This crate turns a flat list of markdown documents into an ordered
//! navigation hierarchy:
//! - [`tokenize`] maps document paths to URL tokens
//! - [`NavTreeBuilder`] folds paths into a [`NavTree`]
//! - [`enrich_titles`] resolves titles from front matter
//! - [`OrderMap`] and [`sort_tree`] apply an explicit ordering file
//! - [`Site`] runs the whole pipeline over a [`Storage`](docnav_storage::Storage)
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use docnav_site::{NavConfig, Site, load_order_file};
//! use docnav_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let site = Site::new(storage, NavConfig::default());
//!
//! let order = load_order_file(Path::new("nav.yaml"))?;
//! let tree = site.build_navigation(order.as_ref())?;
//! let nav = site.navigation(&tree);
//! # Ok(())
//! # }
//! ```

pub mod enrich;
mod error;
pub mod frontmatter;
pub mod order;
mod site;
pub mod tokens;
pub mod tree;

pub use enrich::enrich_titles;
pub use error::NavError;
pub use frontmatter::{FrontMatter, split_front_matter};
pub use order::{OrderError, OrderMap, load_order_file, sort_tree};
pub use site::{NavConfig, PageInfo, Site};
pub use tokens::{is_default_document, title_from_token, tokenize};
pub use tree::{BreadcrumbItem, NavItem, NavNode, NavTree, NavTreeBuilder, NodeId, NodeKind};
