//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading, parsing or checking `site.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid site.toml")]
    Toml(#[from] toml::de::Error),

    #[error("invalid site configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_config_path() {
        let err = ConfigError::Io(
            PathBuf::from("site.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "IO error when reading config `site.toml`");
        assert_eq!(err.source().unwrap().to_string(), "file not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation("[build.pages] `/site/pages` not found".to_string());
        assert_eq!(
            err.to_string(),
            "invalid site configuration: [build.pages] `/site/pages` not found"
        );
    }

    #[test]
    fn test_toml_error_is_chained() {
        let toml_err = toml::from_str::<toml::Table>("[build").unwrap_err();
        let err = ConfigError::from(toml_err);

        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.source().is_some());
    }
}
