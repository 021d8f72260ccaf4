//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagesmith static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; every other path is resolved against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file, relative to the project root [default: site.toml]
    ///
    /// A file given here must exist; the default one is optional.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Layouts directory path (relative to project root)
    #[arg(short, long)]
    pub layouts: Option<PathBuf>,

    /// Pages directory path (relative to project root)
    #[arg(short, long)]
    pub pages: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Static assets directory path (relative to project root)
    #[arg(short = 's', long = "static")]
    pub static_dir: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every page into its layout and copy static assets
    Build {
        /// Remove the output directory before building
        #[arg(long)]
        clean: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "pagesmith",
            "--root",
            "site",
            "-l",
            "theme",
            "--static",
            "assets",
            "build",
            "--clean",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.layouts, Some(PathBuf::from("theme")));
        assert_eq!(cli.static_dir, Some(PathBuf::from("assets")));
        assert_eq!(cli.pages, None);
        assert_eq!(cli.config, None);
        assert!(matches!(cli.command, Commands::Build { clean: true }));
    }

    #[test]
    fn test_parse_explicit_config() {
        let cli = Cli::try_parse_from(["pagesmith", "-C", "prod.toml", "build"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("prod.toml")));
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["pagesmith", "-o", "dist"]).is_err());
    }
}
