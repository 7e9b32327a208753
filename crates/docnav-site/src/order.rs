//! Navigation ordering.
//!
//! An ordering file lists the root's children at the top level. A child is
//! either a plain token or a single-key mapping whose value lists that
//! child's own children:
//!
//! ```yaml
//! - getting-started
//! - guides:
//!     - setup
//!     - deployment
//! - api
//! ```
//!
//! The file flattens into an [`OrderMap`] keyed by parent token, with the
//! root under [`ROOT_KEY`]. Keys are tokens, not paths: two directories with
//! the same name share one list.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::tokens::DEFAULT_DOCUMENT;
use crate::tree::{NavTree, NodeId};

/// Order key of the root node.
pub const ROOT_KEY: &str = DEFAULT_DOCUMENT;

/// Error returned when an ordering specification cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Reading the ordering file failed.
    #[error("Failed to read order file {}: {source}", .path.display())]
    Io {
        /// Ordering file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The ordering file is not valid YAML.
    #[error("Invalid YAML in order file: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A nested entry must have exactly one key.
    #[error("Order entry under '{parent}' must have exactly one key, found {count}")]
    InvalidKeyCount {
        /// Key of the list containing the entry.
        parent: String,
        /// Number of keys found.
        count: usize,
    },
    /// An entry is neither a token nor a nested mapping.
    #[error("Invalid order entry under '{parent}': {reason}")]
    InvalidEntry {
        /// Key of the list containing the entry.
        parent: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Flattened ordering: parent key to ordered child tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderMap {
    entries: HashMap<String, Vec<String>>,
}

impl OrderMap {
    /// Flatten a parsed ordering specification.
    ///
    /// `null` is an empty specification. Otherwise the top level must be a
    /// list; it becomes the entry for [`ROOT_KEY`]. Nested lists are
    /// flattened breadth-first. A key that appears twice keeps its last list.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidKeyCount`] for a mapping without exactly
    /// one key and [`OrderError::InvalidEntry`] for any other malformed entry.
    pub fn from_spec(spec: &Value) -> Result<Self, OrderError> {
        let mut entries = HashMap::new();
        if spec.is_null() {
            return Ok(Self { entries });
        }
        if !spec.is_sequence() {
            return Err(OrderError::InvalidEntry {
                parent: ROOT_KEY.to_owned(),
                reason: "top level must be a list".to_owned(),
            });
        }

        let mut queue = VecDeque::from([(ROOT_KEY.to_owned(), spec)]);
        while let Some((parent, value)) = queue.pop_front() {
            let items: &[Value] = match value {
                Value::Null => &[],
                Value::Sequence(items) => items,
                _ => {
                    return Err(OrderError::InvalidEntry {
                        parent,
                        reason: "children must be a list".to_owned(),
                    });
                }
            };

            let mut children = Vec::with_capacity(items.len());
            for item in items {
                let Value::Mapping(map) = item else {
                    children.push(scalar_token(item).ok_or_else(|| OrderError::InvalidEntry {
                        parent: parent.clone(),
                        reason: "expected a token or a single-key mapping".to_owned(),
                    })?);
                    continue;
                };

                let mut pairs = map.iter();
                let (Some((key, nested)), None) = (pairs.next(), pairs.next()) else {
                    return Err(OrderError::InvalidKeyCount {
                        parent,
                        count: map.len(),
                    });
                };
                let token = scalar_token(key).ok_or_else(|| OrderError::InvalidEntry {
                    parent: parent.clone(),
                    reason: "mapping key must be a scalar".to_owned(),
                })?;
                children.push(token.clone());
                queue.push_back((token, nested));
            }

            if entries.contains_key(&parent) {
                tracing::warn!(key = %parent, "Duplicate order key, later entry wins");
            }
            entries.insert(parent, children);
        }

        Ok(Self { entries })
    }

    /// Parse and flatten an ordering specification from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Parse`] for invalid YAML, otherwise as
    /// [`OrderMap::from_spec`].
    pub fn from_yaml(text: &str) -> Result<Self, OrderError> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_spec(&value)
    }

    /// Ordered child tokens for a parent key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of parent keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parent has an explicit order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stringify a scalar YAML value usable as a token.
fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Load an ordering file.
///
/// Returns `Ok(None)` if the file does not exist or is empty.
///
/// # Errors
///
/// Returns [`OrderError::Io`] if the file cannot be read,
/// [`OrderError::Parse`] for invalid YAML, and the flattening errors of
/// [`OrderMap::from_spec`].
pub fn load_order_file(path: &Path) -> Result<Option<OrderMap>, OrderError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No order file, keeping discovery order");
            return Ok(None);
        }
        Err(source) => {
            return Err(OrderError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let order = OrderMap::from_yaml(&content)?;
    tracing::debug!(path = %path.display(), keys = order.len(), "Loaded order file");
    Ok(Some(order))
}

/// Reorder every level of the tree according to `order`.
///
/// Visits nodes breadth-first. Each node's children are looked up by the
/// node's token ([`ROOT_KEY`] for the root). Listed children come first in
/// list order; unlisted ones follow in their current relative order. Levels
/// without an entry are left untouched.
pub fn sort_tree(tree: &mut NavTree, order: &OrderMap) {
    let mut queue = VecDeque::from([NodeId::ROOT]);
    while let Some(id) = queue.pop_front() {
        let node = tree.node(id);
        let key = if node.is_root() {
            ROOT_KEY
        } else {
            node.token.as_str()
        };

        if let Some(list) = order.get(key) {
            let mut rank: HashMap<&str, usize> = HashMap::with_capacity(list.len());
            for (i, token) in list.iter().enumerate() {
                rank.entry(token.as_str()).or_insert(i);
            }

            let mut children = std::mem::take(&mut tree.node_mut(id).children);
            children.sort_by_key(|&child| {
                rank.get(tree.node(child).token.as_str())
                    .copied()
                    .unwrap_or(usize::MAX)
            });
            tree.node_mut(id).children = children;
        }

        queue.extend(tree.children(id).iter().copied());
    }
}
