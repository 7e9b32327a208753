//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use docnav_site::tree::with_base;
use docnav_site::{
    NavConfig, NavError, NavItem, NavTree, OrderError, PageInfo, Site, load_order_file,
    split_front_matter,
};
use docnav_storage::{Storage, StorageError};
use pulldown_cmark::{Options, Parser, html};
use rayon::prelude::*;

use crate::template::{BreadcrumbData, NavItemData, PageData, render_page};

/// Navigation file written next to the pages.
const NAV_FILENAME: &str = "nav.json";

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Root navigation title when `index.md` does not set one.
    pub site_title: String,
    /// Prefix for generated links.
    pub base_url: String,
    /// Navigation ordering file; `None` or a missing file keeps discovery order.
    pub order_file: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let nav = NavConfig::default();
        Self {
            site_title: nav.site_title,
            base_url: nav.base_url,
            order_file: None,
        }
    }
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Navigation tree could not be built.
    #[error(transparent)]
    Nav(#[from] NavError),
    /// Ordering file could not be loaded.
    #[error(transparent)]
    Order(#[from] OrderError),
    /// Reading a page body failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Navigation could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary of a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of HTML pages written.
    pub page_count: usize,
    /// Number of navigation nodes, root included.
    pub node_count: usize,
}

/// Builds a static documentation site from a storage backend.
pub struct StaticSiteBuilder {
    site: Site,
    order_file: Option<PathBuf>,
}

impl StaticSiteBuilder {
    /// Create a builder over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: BuildConfig) -> Self {
        let nav = NavConfig {
            site_title: config.site_title,
            base_url: config.base_url,
        };
        Self {
            site: Site::new(storage, nav),
            order_file: config.order_file,
        }
    }

    /// Build the navigation without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Order`] if the ordering file is invalid and
    /// [`BuildError::Nav`] if the tree cannot be built.
    pub fn navigation(&self) -> Result<NavItem, BuildError> {
        let tree = self.build_tree()?;
        Ok(self.site.navigation(&tree))
    }

    /// Render the site into `output_dir`.
    ///
    /// Writes `index.html` for the root, `<url_path>/index.html` for every
    /// other page backed by a document, and `nav.json`. Pages render in
    /// parallel; the first failure aborts the build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if navigation cannot be built, a document cannot
    /// be read, or output cannot be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        let tree = self.build_tree()?;
        let nav = self.site.navigation(&tree);
        let pages = Site::pages(&tree);

        fs::create_dir_all(output_dir)?;
        pages
            .par_iter()
            .try_for_each(|page| self.write_page(&tree, &nav, page, output_dir))?;

        fs::write(
            output_dir.join(NAV_FILENAME),
            serde_json::to_string_pretty(&nav)?,
        )?;

        let report = BuildReport {
            page_count: pages.len(),
            node_count: tree.node_count(),
        };
        tracing::info!(
            pages = report.page_count,
            nodes = report.node_count,
            output = %output_dir.display(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Static site built"
        );
        Ok(report)
    }

    fn build_tree(&self) -> Result<NavTree, BuildError> {
        let order = match &self.order_file {
            Some(path) => load_order_file(path)?,
            None => None,
        };
        Ok(self.site.build_navigation(order.as_ref())?)
    }

    fn write_page(
        &self,
        tree: &NavTree,
        nav: &NavItem,
        page: &PageInfo,
        output_dir: &Path,
    ) -> Result<(), BuildError> {
        let html = self.render(tree, nav, page)?;
        let path = output_path(output_dir, &page.url_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::debug!(page = %page.url_path, "Wrote page");
        Ok(())
    }

    fn render(&self, tree: &NavTree, nav: &NavItem, page: &PageInfo) -> Result<String, BuildError> {
        let raw = self.site.storage().read(&page.source_path)?;
        let (_, body) = split_front_matter(&raw);
        let base_url = &self.site.config().base_url;

        let breadcrumbs = tree
            .find(&page.url_path)
            .map(|id| tree.breadcrumbs(id))
            .unwrap_or_default()
            .into_iter()
            .map(|crumb| BreadcrumbData {
                title: crumb.title,
                path: with_base(base_url, &crumb.path),
            })
            .collect();

        let active = with_base(base_url, &page.url_path);
        let data = PageData {
            title: page.title.clone(),
            description: page.description.clone(),
            site_title: nav.title.clone(),
            home_path: nav.path.clone(),
            html_content: render_markdown(body),
            breadcrumbs,
            navigation: nav
                .children
                .iter()
                .map(|item| nav_item_data(item, &active))
                .collect(),
        };
        Ok(render_page(&data))
    }
}

/// Output file for a URL path.
fn output_path(output_dir: &Path, url_path: &str) -> PathBuf {
    let relative = url_path.trim_start_matches('/');
    if relative.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(relative).join("index.html")
    }
}

fn nav_item_data(item: &NavItem, active: &str) -> NavItemData {
    NavItemData {
        title: item.title.clone(),
        path: item.path.clone(),
        children: item
            .children
            .iter()
            .map(|child| nav_item_data(child, active))
            .collect(),
        is_active: item.path == active,
    }
}

/// Render a markdown body to HTML.
fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn docs_storage() -> Arc<MockStorage> {
        Arc::new(
            MockStorage::new()
                .with_document("index.md", "# Welcome\n")
                .with_document("guides/index.md", "---\ntitle: Guides\n---\n# All guides\n")
                .with_document(
                    "guides/setup.md",
                    "---\ntitle: Setup Guide\ndescription: Installing things\n---\n# Setup\n\nRun `make`.\n",
                )
                .with_document("api/reference.md", "# Reference\n"),
        )
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_build_writes_pages_and_nav() {
        let temp_dir = tempfile::tempdir().unwrap();
        let builder = StaticSiteBuilder::new(docs_storage(), BuildConfig::default());

        let report = builder.build(temp_dir.path()).unwrap();

        assert_eq!(
            report,
            BuildReport {
                page_count: 4,
                node_count: 5,
            }
        );
        let out = temp_dir.path();
        assert!(out.join("index.html").is_file());
        assert!(out.join("guides/index.html").is_file());
        assert!(out.join("guides/setup/index.html").is_file());
        assert!(out.join("api/reference/index.html").is_file());
        // Directory without default document has no page
        assert!(!out.join("api/index.html").exists());
        assert!(out.join("nav.json").is_file());
    }

    #[test]
    fn test_build_page_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let builder = StaticSiteBuilder::new(docs_storage(), BuildConfig::default());

        builder.build(temp_dir.path()).unwrap();
        let html = read(&temp_dir.path().join("guides/setup/index.html"));

        assert!(html.contains("<h1>Setup</h1>"));
        assert!(html.contains("<code>make</code>"));
        assert!(!html.contains("title: Setup Guide"));
        assert!(html.contains("<title>Setup Guide | Documentation</title>"));
        assert!(html.contains("content=\"Installing things\""));
        assert!(html.contains("<a href=\"/guides/setup\" class=\"active\">Setup Guide</a>"));
        assert!(html.contains("<li class=\"breadcrumb-item\"><a href=\"/guides\">Guides</a></li>"));
    }

    #[test]
    fn test_build_nav_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let builder = StaticSiteBuilder::new(docs_storage(), BuildConfig::default());

        builder.build(temp_dir.path()).unwrap();
        let nav: serde_json::Value =
            serde_json::from_str(&read(&temp_dir.path().join("nav.json"))).unwrap();

        assert_eq!(nav["title"], "Documentation");
        assert_eq!(nav["children"][0]["path"], "/guides");
        assert_eq!(nav["children"][0]["children"][0]["title"], "Setup Guide");
        assert_eq!(nav["children"][1]["path"], "/api");
    }

    #[test]
    fn test_build_applies_order_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let order_file = temp_dir.path().join("nav.yaml");
        fs::write(&order_file, "- api\n- guides\n").unwrap();
        let config = BuildConfig {
            order_file: Some(order_file),
            ..BuildConfig::default()
        };
        let builder = StaticSiteBuilder::new(docs_storage(), config);

        let nav = builder.navigation().unwrap();

        let top: Vec<_> = nav.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(top, vec!["/api", "/guides"]);
    }

    #[test]
    fn test_build_missing_order_file_keeps_discovery_order() {
        let config = BuildConfig {
            order_file: Some(PathBuf::from("/nonexistent/nav.yaml")),
            ..BuildConfig::default()
        };
        let builder = StaticSiteBuilder::new(docs_storage(), config);

        let nav = builder.navigation().unwrap();

        let top: Vec<_> = nav.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(top, vec!["/guides", "/api"]);
    }

    #[test]
    fn test_build_invalid_order_file_fails_before_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let order_file = temp_dir.path().join("nav.yaml");
        fs::write(&order_file, "- guides: [a]\n  api: [b]\n").unwrap();
        let config = BuildConfig {
            order_file: Some(order_file),
            ..BuildConfig::default()
        };
        let builder = StaticSiteBuilder::new(docs_storage(), config);
        let output_dir = temp_dir.path().join("site");

        let err = builder.build(&output_dir).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Order(OrderError::InvalidKeyCount { count: 2, .. })
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_build_with_base_url() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = BuildConfig {
            base_url: "/docs/".to_owned(),
            ..BuildConfig::default()
        };
        let builder = StaticSiteBuilder::new(docs_storage(), config);

        builder.build(temp_dir.path()).unwrap();
        let html = read(&temp_dir.path().join("guides/setup/index.html"));

        assert!(html.contains("<a href=\"/docs/\" class=\"site-title\">Documentation</a>"));
        assert!(html.contains("<a href=\"/docs/guides/setup\" class=\"active\">"));
        assert!(html.contains("<a href=\"/docs/guides\">Guides</a>"));
    }

    #[test]
    fn test_build_unreadable_page_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(MockStorage::new().with_unreadable("locked.md"));
        let builder = StaticSiteBuilder::new(storage, BuildConfig::default());

        let err = builder.build(temp_dir.path()).unwrap_err();

        assert!(matches!(err, BuildError::Nav(NavError::Storage(_))));
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("/out");

        assert_eq!(output_path(out, "/"), PathBuf::from("/out/index.html"));
        assert_eq!(
            output_path(out, "/guides/setup"),
            PathBuf::from("/out/guides/setup/index.html")
        );
    }

    #[test]
    fn test_render_markdown_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
