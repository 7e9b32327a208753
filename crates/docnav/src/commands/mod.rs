//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod nav;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docnav_builder::{BuildConfig, StaticSiteBuilder};
use docnav_config::{CliSettings, Config};
use docnav_storage::Storage;
use docnav_storage_fs::FsStorage;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;

use crate::error::CliError;

/// Project location arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Navigation order file (overrides config).
    #[arg(long)]
    order_file: Option<PathBuf>,
}

impl ProjectArgs {
    /// Load configuration with these arguments applied on top.
    ///
    /// `settings` carries command-specific overrides; project fields are
    /// filled in here.
    fn load_config(self, settings: CliSettings) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            order_file: self.order_file,
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Create a builder over the configured source directory.
fn create_builder(config: &Config) -> StaticSiteBuilder {
    let storage: Arc<dyn Storage> =
        Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
    let build_config = BuildConfig {
        site_title: config.site.title.clone(),
        base_url: config.site.base_url.clone(),
        order_file: Some(config.docs_resolved.order_file.clone()),
    };
    StaticSiteBuilder::new(storage, build_config)
}
