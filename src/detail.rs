//! Single post lookup.
//!
//! The summary comes from the manifest; the body is read from the post
//! file separately, so an entry can be found while its file is gone
//! (stale manifest). The two failures are reported as different errors.

use crate::{
    config::SiteConfig,
    content::{self, frontmatter},
    manifest::{Manifest, ManifestEntry},
    utils::slug::is_safe_slug,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a detail lookup.
#[derive(Debug, Error)]
pub enum DetailError {
    /// No manifest entry has this slug.
    #[error("post `{0}` not found")]
    NotFound(String),

    /// The entry exists but its body could not be read.
    #[error("failed to read body of `{slug}` from `{}`", .path.display())]
    Body {
        slug: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest itself could not be loaded.
    #[error("manifest unavailable")]
    Manifest(#[source] anyhow::Error),
}

/// A post ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub entry: ManifestEntry,
    /// Post text with the metadata header removed
    pub body: String,
    pub reading_minutes: usize,
    pub recommended: Vec<ManifestEntry>,
}

/// Look up `slug` in the manifest on disk and read its body.
pub fn load_post(config: &SiteConfig, slug: &str) -> Result<PostDetail, DetailError> {
    let manifest =
        Manifest::load(&config.build.manifest_path()).map_err(DetailError::Manifest)?;
    find_post(&manifest, config, slug)
}

/// Look up `slug` in an already loaded manifest and read its body.
pub fn find_post(
    manifest: &Manifest,
    config: &SiteConfig,
    slug: &str,
) -> Result<PostDetail, DetailError> {
    let entry = manifest
        .find(slug)
        .filter(|e| is_safe_slug(&e.slug))
        .ok_or_else(|| DetailError::NotFound(slug.to_owned()))?
        .clone();

    let build = &config.build;
    let raw = content::read_raw(&build.content, slug, &build.extension).map_err(|source| {
        DetailError::Body {
            slug: slug.to_owned(),
            path: content::document_path(&build.content, slug, &build.extension),
            source,
        }
    })?;
    let body = frontmatter::body(&raw).to_owned();

    Ok(PostDetail {
        reading_minutes: reading_minutes(&body, config.listing.words_per_minute),
        recommended: recommend(manifest, slug, config.listing.recommendations),
        entry,
        body,
    })
}

/// Estimated reading time in whole minutes, never below one.
pub fn reading_minutes(text: &str, words_per_minute: usize) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Up to `count` newest posts other than `slug`.
pub fn recommend(manifest: &Manifest, slug: &str, count: usize) -> Vec<ManifestEntry> {
    manifest
        .sorted_by_date()
        .into_iter()
        .filter(|e| e.slug != slug)
        .take(count)
        .collect()
}
