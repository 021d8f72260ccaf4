//! `[build]` section configuration.
//!
//! Source directories, output directory and the clean flag.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in site.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// layouts = "layouts"   # Layout templates, one per file
/// pages = "pages"       # Page definitions (front matter + body)
/// output = "public"     # Rendered `<page>.html` files land here
/// static = "static"     # Mirrored to `<output>/static`
/// clean = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Layout template directory.
    #[serde(default = "defaults::build::layouts")]
    #[educe(Default = defaults::build::layouts())]
    pub layouts: PathBuf,

    /// Page definition directory.
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory, copied verbatim.
    #[serde(rename = "static", default = "defaults::build::static_dir")]
    #[educe(Default = defaults::build::static_dir())]
    pub static_dir: PathBuf,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}
