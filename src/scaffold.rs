//! Post scaffolding: the manifest turned back into post files.
//!
//! Used to seed the post directory from a hand-written manifest. Each
//! entry becomes `<slug>.<ext>` with a metadata header and a short body.
//! Existing files with the same name are overwritten.

use crate::{
    config::SiteConfig,
    content,
    log,
    manifest::{Manifest, ManifestEntry},
    utils::slug::is_safe_slug,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::PathBuf};

/// Write one stub post per manifest entry. Returns the written paths.
pub fn scaffold_posts(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let manifest = Manifest::load(&config.build.manifest_path())?;
    let content_dir = &config.build.content;

    // Check every slug up front so a bad entry writes nothing.
    if let Some(bad) = manifest.entries().iter().find(|e| !is_safe_slug(&e.slug)) {
        bail!("Refusing to scaffold post with unsafe slug {:?}", bad.slug);
    }

    fs::create_dir_all(content_dir)
        .with_context(|| format!("Failed to create {}", content_dir.display()))?;

    let mut written = Vec::with_capacity(manifest.len());
    for entry in manifest.entries() {
        let path = content::document_path(content_dir, &entry.slug, &config.build.extension);
        fs::write(&path, render_post(entry))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log!("scaffold"; "{}", path.display());
        written.push(path);
    }

    log!("scaffold"; "generated {} posts", written.len());
    Ok(written)
}

/// Render the stub file for one entry.
fn render_post(entry: &ManifestEntry) -> String {
    let ManifestEntry {
        slug,
        title,
        date,
        description,
    } = entry;

    format!(
        "---\ntitle: {title}\nslug: {slug}\ndescription: {description}\ndate: {date}\n---\n\n# {title}\n\n{description}\n"
    )
}
