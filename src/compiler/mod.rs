//! Loading, rendering and asset copying for static site generation.
//!
//! - **layout**: named templates and `{{ key }}` substitution
//! - **page**: front matter + body parsing
//! - **assets**: mirroring the static directory
//! - **error**: the pipeline's error type
//!
//! # Build Flow
//!
//! ```text
//! load_layouts() ─┐
//!                 ├──► render_site() ──► <output>/<page>.html
//! load_pages()  ──┘
//! copy_static_assets() ──────────────► <output>/static/**
//! ```

pub mod assets;
pub mod error;
pub mod layout;
pub mod page;

use crate::log;
use error::{BuildError, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// Public API
// ============================================================================

pub use assets::copy_static_assets;
pub use layout::Layout;
pub use page::Page;

/// Layouts keyed by name.
pub type Layouts = BTreeMap<String, Layout>;

/// Pages keyed by name.
pub type Pages = BTreeMap<String, Page>;

/// Load every file under `dir` as a [`Layout`].
pub fn load_layouts(dir: &Path) -> Result<Layouts> {
    let layouts = load_named(dir, "layouts", |name, source| Ok(Layout::new(name, source)))?;

    for layout in layouts.values() {
        if !layout.placeholders().contains(&page::CONTENT_KEY) {
            log!("warn"; "layout `{}` has no {{{{ content }}}} placeholder", layout.name());
        }
    }
    Ok(layouts)
}

/// Load every file under `dir` as a [`Page`].
///
/// The first page that fails to parse fails the whole phase.
pub fn load_pages(dir: &Path) -> Result<Pages> {
    load_named(dir, "pages", |name, source| Page::parse(name, &source))
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively, sorted by path.
///
/// Any enumeration failure (including a missing `dir`) is an error.
pub fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| BuildError::Walk(dir.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Name of a layout or page: the file name without its extension.
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read and construct one item per file in parallel, then key them by name.
///
/// Items are folded in enumeration order, so when two files share a name
/// the one whose path sorts last wins.
fn load_named<T, F>(dir: &Path, kind: &str, build: F) -> Result<BTreeMap<String, T>>
where
    T: Send,
    F: Fn(&str, String) -> Result<T> + Sync,
{
    let files = collect_all_files(dir)?;

    let items = files
        .par_iter()
        .map(|path| -> Result<_> {
            let name = source_name(path);
            let source =
                fs::read_to_string(path).map_err(|err| BuildError::Io(path.clone(), err))?;
            let item = build(&name, source)?;
            Ok((name, path, item))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut named = BTreeMap::new();
    for (name, path, item) in items {
        if named.insert(name.clone(), item).is_some() {
            log!("warn"; "duplicate {kind} name `{name}`, using {}", path.display());
        }
    }

    log!(kind; "loaded {}", named.len());
    Ok(named)
}
