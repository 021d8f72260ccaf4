//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn layouts() -> PathBuf {
        "layouts".into()
    }

    pub fn pages() -> PathBuf {
        "pages".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn static_dir() -> PathBuf {
        "static".into()
    }
}
