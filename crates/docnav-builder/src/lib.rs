//! Static HTML site generation for docnav.
//!
//! [`StaticSiteBuilder`] builds the navigation tree, renders every document
//! backed page to `<url_path>/index.html` and writes the navigation as
//! `nav.json` next to it.

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder};
