//! Navigation tree for the document hierarchy.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<NavNode>` arena and addressed by [`NodeId`].
//! Parent-to-children edges are ordered lists of child ids, so reordering a
//! level never moves node data. The "does this parent already have a child
//! with token T" table only exists inside [`NavTreeBuilder`] and is dropped
//! once the tree is built.
//!
//! Node identity is the token path from the root: `guides/setup.md` and
//! `guides/setup/index.md` address the same node.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::error::NavError;
use crate::tokens::{is_default_document, tokenize};

/// Relative path sentinel for the root node.
pub const ROOT_RELATIVE_PATH: &str = "/";

/// Index of a node in a [`NavTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node.
    pub const ROOT: NodeId = NodeId(0);
}

/// Whether a node stands for a directory or a single page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory node; backed by its default document if one exists.
    Directory,
    /// Page node; always a leaf.
    File,
}

/// One directory or document in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavNode {
    /// Absolute URL path from the site root (e.g., `/guides/setup`).
    pub url_path: String,
    /// Path relative to the documentation root (e.g., `guides/setup`), or
    /// [`ROOT_RELATIVE_PATH`] for the root.
    pub relative_path: String,
    /// Segment identifying this node among its siblings; empty for the root.
    pub token: String,
    /// Display title; empty until enriched.
    pub title: String,
    /// Description from front matter.
    pub description: Option<String>,
    /// Directory or page.
    pub kind: NodeKind,
    /// Backing document resolved during enrichment (e.g., `guides/index.md`).
    pub document: Option<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl NavNode {
    fn root() -> Self {
        Self {
            url_path: "/".to_owned(),
            relative_path: ROOT_RELATIVE_PATH.to_owned(),
            token: String::new(),
            title: String::new(),
            description: None,
            kind: NodeKind::Directory,
            document: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Whether this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Ordered child ids.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent id, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
    /// Page description, if the document declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Directory or page.
    pub kind: NodeKind,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
}

/// Rooted navigation tree.
///
/// Always contains the root node. Built by [`NavTreeBuilder`], then titled by
/// [`enrich_titles`](crate::enrich_titles) and reordered by
/// [`sort_tree`](crate::sort_tree).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTree {
    nodes: Vec<NavNode>,
}

impl NavTree {
    /// The root node.
    #[must_use]
    pub fn root(&self) -> &NavNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NavNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NavNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ordered children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Node ids in breadth-first order, parents before children.
    #[must_use]
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([NodeId::ROOT]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        order
    }

    /// Find a node by URL path (e.g., `/guides/setup`, `/` for the root).
    #[must_use]
    pub fn find(&self, url_path: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for token in url_path.split('/').filter(|s| !s.is_empty()) {
            current = *self
                .children(current)
                .iter()
                .find(|&&child| self.node(child).token == token)?;
        }
        Some(current)
    }

    /// Build breadcrumbs for a node.
    ///
    /// Returns ancestors root-first; the node itself is not included.
    #[must_use]
    pub fn breadcrumbs(&self, id: NodeId) -> Vec<BreadcrumbItem> {
        let mut ancestors = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(i) = current {
            let node = self.node(i);
            ancestors.push(BreadcrumbItem {
                title: node.title.clone(),
                path: node.url_path.clone(),
            });
            current = node.parent;
        }
        ancestors.reverse();
        ancestors
    }

    /// Convert the tree into nested [`NavItem`]s rooted at the root node.
    ///
    /// Link paths are prefixed with `base_url` (`/` leaves them unchanged).
    #[must_use]
    pub fn to_nav_item(&self, base_url: &str) -> NavItem {
        self.nav_item(NodeId::ROOT, base_url)
    }

    fn nav_item(&self, id: NodeId, base_url: &str) -> NavItem {
        let node = self.node(id);
        NavItem {
            title: node.title.clone(),
            path: with_base(base_url, &node.url_path),
            description: node.description.clone(),
            kind: node.kind,
            children: node
                .children
                .iter()
                .map(|&child| self.nav_item(child, base_url))
                .collect(),
        }
    }
}

/// Prefix a site-root URL path with the configured base URL.
///
/// `with_base("/docs/", "/guides")` gives `/docs/guides`; the root maps to the
/// base itself.
#[must_use]
pub fn with_base(base_url: &str, url_path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if url_path == "/" {
        format!("{base}/")
    } else {
        format!("{base}{url_path}")
    }
}

/// Join a parent URL path with a child token without doubling the root `/`.
fn join_url(parent: &str, token: &str) -> String {
    if parent == "/" {
        format!("/{token}")
    } else {
        format!("{parent}/{token}")
    }
}

/// Builder folding document paths into a [`NavTree`].
///
/// Paths are applied in the order given; that order becomes the sibling order
/// until the tree is sorted.
pub struct NavTreeBuilder {
    tree: NavTree,
    /// `(parent, token) -> child` lookup, construction only.
    lookup: HashMap<(NodeId, String), NodeId>,
    /// Document that claimed each node, construction only.
    claims: HashMap<NodeId, String>,
}

impl Default for NavTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NavTreeBuilder {
    /// Create a builder holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: NavTree {
                nodes: vec![NavNode::root()],
            },
            lookup: HashMap::new(),
            claims: HashMap::new(),
        }
    }

    /// Build a tree from document paths in one go.
    ///
    /// # Errors
    ///
    /// See [`NavTreeBuilder::add_document`].
    pub fn from_paths<I, S>(paths: I) -> Result<NavTree, NavError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for path in paths {
            builder.add_document(path.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Fold one document path into the tree.
    ///
    /// Walks from the root following the path's tokens, reusing existing
    /// children and creating missing ones. Intermediate nodes are
    /// directories; the final node is a page unless the path is a default
    /// document, which stands for its directory. An empty token sequence
    /// claims the root.
    ///
    /// # Returns
    ///
    /// Id of the node the document is attached to.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::DuplicateDocument`] if another document already
    /// claimed the node, and [`NavError::FileHasChildren`] if the path runs
    /// through a page node or a page lands on a directory.
    pub fn add_document(&mut self, path: &str) -> Result<NodeId, NavError> {
        let tokens = tokenize(path);
        let is_default = is_default_document(path);
        let mut current = NodeId::ROOT;

        for (i, token) in tokens.iter().enumerate() {
            let node = self.tree.node(current);
            if node.kind == NodeKind::File {
                return Err(NavError::FileHasChildren {
                    url_path: node.url_path.clone(),
                    source_path: path.to_owned(),
                });
            }

            let is_last = i + 1 == tokens.len();
            current = match self.lookup.get(&(current, token.clone())) {
                Some(&existing) => existing,
                None => {
                    let kind = if is_last && !is_default {
                        NodeKind::File
                    } else {
                        NodeKind::Directory
                    };
                    self.add_child(current, token, kind)
                }
            };
        }

        self.claim(current, path, !tokens.is_empty() && !is_default)?;
        Ok(current)
    }

    /// Attach `path` as the backing document of `id`.
    fn claim(&mut self, id: NodeId, path: &str, expects_file: bool) -> Result<(), NavError> {
        let node = self.tree.node(id);

        if let Some(first) = self.claims.get(&id) {
            if first == path {
                return Ok(());
            }
            return Err(NavError::DuplicateDocument {
                url_path: node.url_path.clone(),
                first: first.clone(),
                second: path.to_owned(),
            });
        }

        if expects_file && node.kind == NodeKind::Directory {
            return Err(NavError::FileHasChildren {
                url_path: node.url_path.clone(),
                source_path: path.to_owned(),
            });
        }

        self.claims.insert(id, path.to_owned());
        Ok(())
    }

    fn add_child(&mut self, parent_id: NodeId, token: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.tree.nodes.len());
        let parent = self.tree.node(parent_id);
        let node = NavNode {
            url_path: join_url(&parent.url_path, token),
            relative_path: if parent.is_root() {
                token.to_owned()
            } else {
                format!("{}/{token}", parent.relative_path)
            },
            token: token.to_owned(),
            title: String::new(),
            description: None,
            kind,
            document: None,
            children: Vec::new(),
            parent: Some(parent_id),
        };

        self.tree.nodes.push(node);
        self.tree.node_mut(parent_id).children.push(id);
        self.lookup.insert((parent_id, token.to_owned()), id);
        id
    }

    /// Finish construction, discarding the lookup tables.
    #[must_use]
    pub fn build(self) -> NavTree {
        self.tree
    }
}
