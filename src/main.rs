//! Pagesmith - a static site generator that wraps pages in named layouts.

mod build;
mod cli;
mod compiler;
mod config;
mod logger;

use anyhow::{Context, Result};
use build::generate;
use clap::Parser;
use cli::{Cli, Commands};
use config::{CONFIG_FILE, SiteConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;
    match &config.config_path {
        Some(path) => log!("config"; "using {}", path.display()),
        None => log!("config"; "no {CONFIG_FILE} found, using defaults"),
    }
    config.validate()?;

    Ok(config)
}

fn build_all(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let summary = generate(&config.build)
        .with_context(|| format!("Failed to build site into {}", output.display()))?;

    log!(
        "build";
        "done: {} pages from {} layouts, {} static files",
        summary.pages,
        summary.layouts,
        summary.assets
    );
    Ok(())
}
