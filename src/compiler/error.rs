//! Build pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Errors raised while loading, rendering or copying.
///
/// None of them are recovered inside a build; the first one observed at a
/// phase's join point fails the whole `generate` call.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to enumerate `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("`{0}` is outside of its source directory")]
    Path(PathBuf),

    #[error("failed to parse page `{page}`: {reason}")]
    Parse { page: String, reason: String },

    #[error("no layout `{layout}` found for page `{page}`")]
    MissingLayout { page: String, layout: String },
}

impl BuildError {
    pub(crate) fn parse(page: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            page: page.to_owned(),
            reason: reason.into(),
        }
    }
}
