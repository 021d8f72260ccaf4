use super::collect_all_files;
use super::error::{BuildError, Result};
use crate::log;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Output subdirectory the static tree is mirrored into.
pub const STATIC_OUTPUT_DIR: &str = "static";

/// Mirror every file under `static_dir` into `<output>/static`.
///
/// Files are copied byte for byte at the same relative path; empty
/// directories are not reproduced. Returns the number of files copied.
pub fn copy_static_assets(static_dir: &Path, output: &Path) -> Result<usize> {
    let target = output.join(STATIC_OUTPUT_DIR);
    let files = collect_all_files(static_dir)?;

    files
        .par_iter()
        .try_for_each(|path| copy_asset(path, static_dir, &target))?;

    log!("static"; "copied {} files", files.len());
    Ok(files.len())
}

fn copy_asset(path: &Path, static_dir: &Path, target: &Path) -> Result<()> {
    let relative = path
        .strip_prefix(static_dir)
        .map_err(|_| BuildError::Path(path.to_path_buf()))?;
    let dest = target.join(relative);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::Io(parent.to_path_buf(), err))?;
    }
    fs::copy(path, &dest).map_err(|err| BuildError::Io(dest.clone(), err))?;
    Ok(())
}
