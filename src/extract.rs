//! Manifest extraction.
//!
//! ```text
//! extract_manifest()
//!     │
//!     ├── collect_documents()  ──► list post dir (file-name order), parse headers
//!     │
//!     └── Manifest::write()    ──► replace <data>/<manifest>
//! ```
//!
//! The run is all-or-nothing: every post is read and parsed before the
//! manifest file is opened, so a read error leaves the previous manifest
//! in place.

use crate::{
    config::SiteConfig,
    content::{self, Document},
    log,
    manifest::{Manifest, ManifestEntry},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regenerate the manifest from the post directory.
pub fn extract_manifest(config: &SiteConfig) -> Result<Manifest> {
    let content = &config.build.content;
    let output = config.build.manifest_path();

    log!("build"; "reading {}", content.display());
    let manifest = collect_manifest(content, &config.build.extension)?;

    if manifest.is_empty() {
        log!("warn"; "no .{} files in {}", config.build.extension, content.display());
    }

    manifest.write(&output)?;
    log!("build"; "wrote {} entries to {}", manifest.len(), output.display());

    Ok(manifest)
}

/// Parse every post in `dir` into a manifest, without writing anything.
pub fn collect_manifest(dir: &Path, extension: &str) -> Result<Manifest> {
    let entries = collect_documents(dir, extension)?
        .iter()
        .map(|path| Document::read(path, extension).map(ManifestEntry::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(Manifest::new(entries))
}

/// List post files directly inside `dir`, sorted by file name.
///
/// Subdirectories and files with other extensions are skipped.
fn collect_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // broken entries are only fatal when they would have been posts
            Err(err)
                if err.depth() > 0
                    && err
                        .path()
                        .is_some_and(|path| content::slug_of(path, extension).is_none()) =>
            {
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to list post directory {}", dir.display()));
            }
        };
        if entry.file_type().is_file() && content::slug_of(entry.path(), extension).is_some() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
