//! `docnav nav` command implementation.

use std::io::{self, Write};

use clap::Args;
use docnav_config::CliSettings;

use super::{ProjectArgs, create_builder};
use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl NavArgs {
    /// Print the navigation tree as JSON to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or navigation cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.project.load_config(CliSettings::default())?;
        let nav = create_builder(&config).navigation()?;

        let json = if self.compact {
            serde_json::to_string(&nav)?
        } else {
            serde_json::to_string_pretty(&nav)?
        };

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}
