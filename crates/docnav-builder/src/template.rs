//! HTML page template for static site generation.

use std::fmt::Write;

/// Data for rendering a navigation item in the static template.
pub(crate) struct NavItemData {
    pub title: String,
    pub path: String,
    pub children: Vec<NavItemData>,
    pub is_active: bool,
}

/// Data for a breadcrumb entry.
pub(crate) struct BreadcrumbData {
    pub title: String,
    pub path: String,
}

/// All data needed to render a static page.
pub(crate) struct PageData {
    pub title: String,
    pub description: Option<String>,
    pub site_title: String,
    pub home_path: String,
    pub html_content: String,
    pub breadcrumbs: Vec<BreadcrumbData>,
    pub navigation: Vec<NavItemData>,
}

const STYLE: &str = "\
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 280px; flex-shrink: 0; border-right: 1px solid #e5e7eb; padding: 1.5rem 1rem; }
.sidebar ul { list-style: none; margin: 0; padding: 0; }
.sidebar ul ul { margin-left: 0.75rem; }
.sidebar a { display: block; padding: 0.375rem; color: #374151; text-decoration: none; font-size: 0.875rem; }
.sidebar a.active { color: #1d4ed8; font-weight: 500; }
.site-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1.25rem; }
.content { flex: 1; max-width: 72rem; padding: 1.5rem 2rem 3rem; }
.breadcrumbs ol { display: flex; list-style: none; margin: 0 0 1.5rem; padding: 0; font-size: 0.875rem; }
.breadcrumb-item::after { content: \"/\"; margin: 0 0.5rem 0 0.625rem; color: #9ca3af; }
.breadcrumb-item:last-child::after { content: none; }
";

/// Render a complete static HTML page.
pub(crate) fn render_page(page: &PageData) -> String {
    let mut html = String::with_capacity(8192);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if page.title == page.site_title {
        let _ = writeln!(html, "<title>{}</title>", escape(&page.title));
    } else {
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            escape(&page.title),
            escape(&page.site_title)
        );
    }
    if let Some(description) = &page.description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    let _ = writeln!(html, "<style>\n{STYLE}</style>");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut html, page);

    html.push_str("<div class=\"content\">\n");
    render_breadcrumbs(&mut html, &page.breadcrumbs);
    html.push_str("<main>\n<article>\n");
    html.push_str(&page.html_content);
    html.push_str("\n</article>\n</main>\n");
    html.push_str("</div>\n</div>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Render the navigation sidebar.
fn render_sidebar(html: &mut String, page: &PageData) {
    html.push_str("<aside class=\"sidebar\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\" class=\"site-title\">{}</a>",
        escape(&page.home_path),
        escape(&page.site_title)
    );

    html.push_str("<nav>\n<ul>\n");
    render_nav_items(html, &page.navigation);
    html.push_str("</ul>\n</nav>\n");

    html.push_str("</aside>\n");
}

/// Render navigation items recursively.
fn render_nav_items(html: &mut String, items: &[NavItemData]) {
    for item in items {
        html.push_str("<li>\n");

        let class = if item.is_active { " class=\"active\"" } else { "" };
        let _ = writeln!(
            html,
            "<a href=\"{}\"{class}>{}</a>",
            escape(&item.path),
            escape(&item.title),
        );

        if !item.children.is_empty() {
            html.push_str("<ul>\n");
            render_nav_items(html, &item.children);
            html.push_str("</ul>\n");
        }

        html.push_str("</li>\n");
    }
}

/// Render breadcrumbs.
fn render_breadcrumbs(html: &mut String, breadcrumbs: &[BreadcrumbData]) {
    if breadcrumbs.is_empty() {
        return;
    }
    html.push_str("<nav class=\"breadcrumbs\">\n<ol>\n");
    for crumb in breadcrumbs {
        let _ = writeln!(
            html,
            "<li class=\"breadcrumb-item\"><a href=\"{}\">{}</a></li>",
            escape(&crumb.path),
            escape(&crumb.title),
        );
    }
    html.push_str("</ol>\n</nav>\n");
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
