//! `[build]` section configuration.
//!
//! Where posts are read from and where the manifest is written.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - post directory and manifest location.
///
/// # Example
/// ```toml
/// [build]
/// content = "src/content/blog"
/// data = "src/data"
/// manifest = "blogPosts.json"
/// extension = "md"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root, set from the CLI (never read from the file).
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding one post file per slug.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Directory the manifest is written into (created if absent).
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Manifest file name inside `data`.
    #[serde(default = "defaults::build::manifest")]
    #[educe(Default = defaults::build::manifest())]
    pub manifest: String,

    /// Post file extension, without the leading dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,
}

impl BuildConfig {
    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.data.join(&self.manifest)
    }
}
