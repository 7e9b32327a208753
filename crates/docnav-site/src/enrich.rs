//! Title and description resolution from document front matter.

use docnav_storage::Storage;

use crate::error::NavError;
use crate::frontmatter::{FrontMatter, split_front_matter};
use crate::tokens::{DEFAULT_DOCUMENT, MARKDOWN_EXTENSION, title_from_token};
use crate::tree::{NavNode, NavTree, NodeKind};

/// Document that backs a node, whether or not it exists.
///
/// Directories are backed by their default document, pages by the file
/// named after their relative path.
#[must_use]
pub fn backing_document(node: &NavNode) -> String {
    match node.kind {
        NodeKind::Directory if node.is_root() => format!("{DEFAULT_DOCUMENT}{MARKDOWN_EXTENSION}"),
        NodeKind::Directory => format!(
            "{}/{DEFAULT_DOCUMENT}{MARKDOWN_EXTENSION}",
            node.relative_path
        ),
        NodeKind::File => format!("{}{MARKDOWN_EXTENSION}", node.relative_path),
    }
}

/// Resolve title, description and backing document for every node.
///
/// Visits nodes breadth-first. A front matter `title` wins over the title
/// derived from the node's token; the root falls back to `site_title`.
/// Nodes without a backing document keep the derived title.
///
/// # Errors
///
/// Returns [`NavError::Storage`] if an existing backing document cannot be
/// read.
pub fn enrich_titles(
    tree: &mut NavTree,
    storage: &dyn Storage,
    site_title: &str,
) -> Result<(), NavError> {
    for id in tree.breadth_first() {
        let node = tree.node(id);
        let candidate = backing_document(node);

        let (document, front) = if storage.exists(&candidate) {
            let raw = storage.read(&candidate)?;
            let front = read_front_matter(&candidate, &raw);
            (Some(candidate), front)
        } else {
            (None, FrontMatter::default())
        };

        let fallback = if node.is_root() {
            site_title.to_owned()
        } else {
            title_from_token(&node.token)
        };

        let node = tree.node_mut(id);
        node.title = front.title.unwrap_or(fallback);
        node.description = front.description;
        node.document = document;
    }
    Ok(())
}

fn read_front_matter(path: &str, raw: &str) -> FrontMatter {
    let (Some(yaml), _) = split_front_matter(raw) else {
        return FrontMatter::default();
    };
    match FrontMatter::parse(yaml) {
        Ok(front) => front,
        Err(e) => {
            tracing::warn!(path, error = %e, "Ignoring malformed front matter");
            FrontMatter::default()
        }
    }
}
