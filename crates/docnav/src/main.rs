//! docnav CLI - documentation navigation builder.
//!
//! Provides commands for:
//! - `build`: Render the documentation as a static HTML site
//! - `nav`: Print the navigation tree as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, NavArgs};
use output::Output;

/// docnav - documentation navigation builder.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (pipeline timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static documentation site.
    Build(BuildArgs),
    /// Print the navigation tree as JSON.
    Nav(NavArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "docnav",
            "build",
            "--source-dir",
            "content",
            "--output-dir",
            "public",
            "--base-url",
            "/docs/",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_parse_nav_global_verbose_before_command() {
        let cli = Cli::try_parse_from(["docnav", "-v", "nav", "--compact"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Nav(_)));
    }

    #[test]
    fn test_nav_rejects_output_dir() {
        assert!(Cli::try_parse_from(["docnav", "nav", "--output-dir", "site"]).is_err());
    }
}
