//! Navigation pipeline over a document storage.

use std::sync::Arc;
use std::time::Instant;

use docnav_storage::Storage;
use serde::Serialize;

use crate::enrich::enrich_titles;
use crate::error::NavError;
use crate::order::{OrderMap, sort_tree};
use crate::tree::{NavItem, NavTree, NavTreeBuilder};

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Settings for navigation building.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavConfig {
    /// Title of the root node when `index.md` does not declare one.
    pub site_title: String,
    /// Prefix applied to link paths in [`NavItem`]s.
    pub base_url: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            site_title: "Documentation".to_owned(),
            base_url: "/".to_owned(),
        }
    }
}

/// Metadata of one rendered page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// URL path from the site root.
    pub url_path: String,
    /// Backing document relative to the documentation root.
    pub source_path: String,
    /// Display title.
    pub title: String,
    /// Description from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Documentation site navigation.
///
/// Owns the storage and settings; every [`Site::build_navigation`] call
/// rebuilds the tree from a fresh scan.
pub struct Site {
    storage: Arc<dyn Storage>,
    config: NavConfig,
}

impl Site {
    /// Create a site over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: NavConfig) -> Self {
        Self { storage, config }
    }

    /// Navigation settings.
    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Underlying document storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Scan, build, enrich and sort the navigation tree.
    ///
    /// Without an ordering, siblings keep discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] if scanning or reading documents fails or two
    /// documents conflict in the tree.
    pub fn build_navigation(&self, order: Option<&OrderMap>) -> Result<NavTree, NavError> {
        let start = Instant::now();

        let paths = self.storage.scan()?;
        let document_count = paths.len();
        let mut tree = NavTreeBuilder::from_paths(&paths)?;
        enrich_titles(&mut tree, self.storage.as_ref(), &self.config.site_title)?;
        if let Some(order) = order {
            sort_tree(&mut tree, order);
        }

        tracing::debug!(
            document_count,
            node_count = tree.node_count(),
            ordered = order.is_some(),
            elapsed_ms = elapsed_ms(start),
            "Navigation built"
        );
        Ok(tree)
    }

    /// Nested navigation with configured link prefix.
    #[must_use]
    pub fn navigation(&self, tree: &NavTree) -> NavItem {
        tree.to_nav_item(&self.config.base_url)
    }

    /// Pages backed by a document, in breadth-first order.
    #[must_use]
    pub fn pages(tree: &NavTree) -> Vec<PageInfo> {
        tree.breadth_first()
            .into_iter()
            .filter_map(|id| {
                let node = tree.node(id);
                let source_path = node.document.clone()?;
                Some(PageInfo {
                    url_path: node.url_path.clone(),
                    source_path,
                    title: node.title.clone(),
                    description: node.description.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::NodeKind;

    fn create_site(storage: MockStorage) -> Site {
        Site::new(Arc::new(storage), NavConfig::default())
    }

    fn docs_storage() -> MockStorage {
        MockStorage::new()
            .with_document("api/reference.md", "# Reference\n")
            .with_document("guides/index.md", "---\ntitle: Guides\n---\n")
            .with_document("guides/setup.md", "---\ntitle: Setup Guide\n---\n# Setup\n")
            .with_document("index.md", "# Home\n")
    }

    #[test]
    fn test_site_is_send_sync() {
        static_assertions::assert_impl_all!(Site: Send, Sync);
    }

    #[test]
    fn test_build_navigation_end_to_end() {
        let site = create_site(docs_storage());

        let tree = site.build_navigation(None).unwrap();
        let nav = site.navigation(&tree);

        assert_eq!(nav.title, "Documentation");
        assert_eq!(nav.path, "/");
        let top: Vec<_> = nav.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(top, vec!["/api", "/guides"]);

        let api = &nav.children[0];
        assert_eq!(api.kind, NodeKind::Directory);
        assert_eq!(api.title, "Api");
        assert_eq!(api.children[0].path, "/api/reference");
        assert_eq!(api.children[0].title, "Reference");

        let guides = &nav.children[1];
        assert_eq!(guides.kind, NodeKind::Directory);
        assert_eq!(guides.title, "Guides");
        assert_eq!(guides.children.len(), 1);
        assert_eq!(guides.children[0].path, "/guides/setup");
        assert_eq!(guides.children[0].title, "Setup Guide");
        assert_eq!(guides.children[0].kind, NodeKind::File);
    }

    #[test]
    fn test_build_navigation_with_order() {
        let site = create_site(docs_storage());
        let order = OrderMap::from_yaml("- guides\n- api\n").unwrap();

        let tree = site.build_navigation(Some(&order)).unwrap();
        let nav = site.navigation(&tree);

        let top: Vec<_> = nav.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(top, vec!["/guides", "/api"]);
    }

    #[test]
    fn test_build_navigation_twice_is_identical() {
        let site = create_site(docs_storage());
        let order = OrderMap::from_yaml("- guides\n").unwrap();

        let first = site.build_navigation(Some(&order)).unwrap();
        let second = site.build_navigation(Some(&order)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_navigation_empty_storage() {
        let site = create_site(MockStorage::new());

        let tree = site.build_navigation(None).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().title, "Documentation");
        assert!(Site::pages(&tree).is_empty());
    }

    #[test]
    fn test_build_navigation_conflict_is_error() {
        let site = create_site(
            MockStorage::new()
                .with_document("guide.md", "")
                .with_document("guide/index.md", ""),
        );

        let err = site.build_navigation(None).unwrap_err();

        assert!(matches!(err, NavError::DuplicateDocument { .. }));
    }

    #[test]
    fn test_navigation_applies_base_url() {
        let config = NavConfig {
            base_url: "/docs/".to_owned(),
            ..NavConfig::default()
        };
        let site = Site::new(Arc::new(docs_storage()), config);

        let tree = site.build_navigation(None).unwrap();
        let nav = site.navigation(&tree);

        assert_eq!(nav.path, "/docs/");
        assert_eq!(nav.children[1].children[0].path, "/docs/guides/setup");
    }

    #[test]
    fn test_pages_lists_backed_nodes() {
        let site = create_site(
            MockStorage::new()
                .with_document("index.md", "")
                .with_document("api/reference.md", "---\ndescription: All endpoints\n---\n"),
        );

        let tree = site.build_navigation(None).unwrap();
        let pages = Site::pages(&tree);

        assert_eq!(
            pages,
            vec![
                PageInfo {
                    url_path: "/".to_owned(),
                    source_path: "index.md".to_owned(),
                    title: "Documentation".to_owned(),
                    description: None,
                },
                PageInfo {
                    url_path: "/api/reference".to_owned(),
                    source_path: "api/reference.md".to_owned(),
                    title: "Reference".to_owned(),
                    description: Some("All endpoints".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_build_navigation_from_filesystem() {
        use docnav_storage_fs::FsStorage;
        use std::fs;

        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path();
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(docs.join("index.md"), "# Home").unwrap();
        fs::write(docs.join("guides/getting-started.md"), "# Start").unwrap();
        fs::write(docs.join("guides/index.md"), "---\ntitle: User Guides\n---\n").unwrap();

        let storage = FsStorage::new(docs.to_path_buf());
        let site = Site::new(Arc::new(storage), NavConfig::default());
        let tree = site.build_navigation(None).unwrap();

        let guides = tree.node(tree.find("/guides").unwrap());
        assert_eq!(guides.title, "User Guides");
        let start = tree.node(tree.find("/guides/getting-started").unwrap());
        assert_eq!(start.title, "Getting Started");
    }
}
