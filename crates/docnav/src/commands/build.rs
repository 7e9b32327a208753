//! `docnav build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::CliSettings;

use super::{ProjectArgs, create_builder};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Prefix for generated links, e.g. `/docs/` (overrides config).
    #[arg(long, env = "DOCNAV_BASE_URL")]
    base_url: Option<String>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.project.load_config(CliSettings {
            output_dir: self.output_dir,
            base_url: self.base_url,
            ..CliSettings::default()
        })?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", config.output_dir.display()));

        let report = create_builder(&config).build(&config.output_dir)?;

        output.success(&format!(
            "Built {} pages to {}",
            report.page_count,
            config.output_dir.display()
        ));
        Ok(())
    }
}
