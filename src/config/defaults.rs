//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "src/content/blog".into()
    }

    pub fn data() -> PathBuf {
        "src/data".into()
    }

    pub fn manifest() -> String {
        "blogPosts.json".into()
    }

    pub fn extension() -> String {
        "md".into()
    }
}

// ============================================================================
// [listing] Section Defaults
// ============================================================================

pub mod listing {
    pub fn per_page() -> usize {
        6
    }

    pub fn recommendations() -> usize {
        2
    }

    pub fn words_per_minute() -> usize {
        200
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
