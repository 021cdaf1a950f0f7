//! The post manifest: one summary entry per post, stored as a JSON array.
//!
//! ```json
//! [
//!   {
//!     "slug": "hello-world",
//!     "title": "Hello",
//!     "date": "2024-01-01",
//!     "description": "World"
//!   }
//! ]
//! ```
//!
//! The extractor is the only writer and always replaces the whole file.
//! Everything else reads it, and nothing checks it against the post
//! directory afterwards: renaming or deleting a post leaves the manifest
//! stale until the next build.

use crate::{content::Document, utils::date};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Summary of one post. Every field is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    /// File name stem of the post
    pub slug: String,
    pub title: String,
    /// Date exactly as written in the post header
    pub date: String,
    pub description: String,
}

impl From<Document> for ManifestEntry {
    fn from(doc: Document) -> Self {
        let Document { slug, metadata } = doc;
        Self {
            slug,
            title: metadata.title,
            date: metadata.date,
            description: metadata.description,
        }
    }
}

/// Ordered list of entries, in the order the extractor visited the posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `slug`.
    pub fn find(&self, slug: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Entries ordered newest first.
    ///
    /// Unparsable dates count as the epoch; equal dates keep manifest order.
    pub fn sorted_by_date(&self) -> Vec<ManifestEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_cached_key(|e| std::cmp::Reverse(date::sort_key(&e.date)));
        sorted
    }

    /// Serialize as a pretty-printed JSON array (two-space indent).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize manifest")
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse manifest")
    }

    /// Read a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    /// Replace the manifest file at `path`, creating its directory if needed.
    ///
    /// The JSON is fully rendered before the file is touched.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}
