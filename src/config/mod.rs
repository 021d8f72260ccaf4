//! Site configuration management for `site.toml`.
//!
//! The default `site.toml` is optional and every field has a default. A file
//! named with `-C` must exist. CLI flags override the file, and all paths are
//! finally resolved against the project root.
//!
//! # Example
//!
//! ```toml
//! [build]
//! layouts = "layouts"
//! pages = "pages"
//! output = "public"
//! static = "static"
//! clean = false
//! ```

mod build;
pub mod defaults;
mod error;

pub use build::BuildConfig;
pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the project root when `-C` is not given.
pub const CONFIG_FILE: &str = "site.toml";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing site.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path of the config file that was read, if any
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config for `cli`, apply its overrides and resolve paths.
    ///
    /// Without `-C`, a missing `site.toml` falls back to defaults. An
    /// explicit `-C` file that cannot be read is a [`ConfigError::Io`].
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let explicit = cli.config.as_deref();
        let path = root.join(explicit.unwrap_or(Path::new(CONFIG_FILE)));

        let mut config = if explicit.is_some() || path.exists() {
            let mut config = Self::from_path(&path)?;
            config.config_path = Some(Self::normalize_path(&path));
            config
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.layouts, cli.layouts.as_ref());
        Self::update_option(&mut self.build.pages, cli.pages.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.static_dir, cli.static_dir.as_ref());

        match &cli.command {
            Commands::Build { clean } => self.build.clean |= *clean,
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all directory paths against root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.layouts = Self::normalize_path(&root.join(&self.build.layouts));
        self.build.pages = Self::normalize_path(&root.join(&self.build.pages));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.static_dir = Self::normalize_path(&root.join(&self.build.static_dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate resolved paths before building.
    ///
    /// Source directories must exist, and the output directory must not
    /// overlap any of them (a clean build would otherwise delete sources).
    pub fn validate(&self) -> Result<()> {
        let sources = [
            ("[build.layouts]", &self.build.layouts),
            ("[build.pages]", &self.build.pages),
            ("[build.static]", &self.build.static_dir),
        ];

        for (field, path) in sources {
            if !path.exists() {
                bail!(ConfigError::Validation(format!(
                    "{field} `{}` not found",
                    path.display()
                )));
            }
            if !path.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "{field} `{}` is not a directory",
                    path.display()
                )));
            }
            let output = &self.build.output;
            if output.starts_with(path) || path.starts_with(output) {
                bail!(ConfigError::Validation(format!(
                    "[build.output] `{}` overlaps {field} `{}`",
                    output.display(),
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
