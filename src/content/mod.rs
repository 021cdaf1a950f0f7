//! Post documents on disk.
//!
//! One file per post; the file name without extension is the slug.

pub mod frontmatter;

use anyhow::{Context, Result, anyhow};
use frontmatter::Metadata;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A parsed post file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub slug: String,
    pub metadata: Metadata,
}

impl Document {
    /// Parse a document from its slug and raw content.
    pub fn parse(slug: impl Into<String>, content: &str) -> Self {
        let (block, _) = frontmatter::split(content);
        Self {
            slug: slug.into(),
            metadata: frontmatter::parse(block.unwrap_or_default()),
        }
    }

    /// Read and parse a document file.
    pub fn read(path: &Path, extension: &str) -> Result<Self> {
        let slug = slug_of(path, extension)
            .ok_or_else(|| anyhow!("Not a .{extension} file: {}", path.display()))?;
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::parse(slug, &String::from_utf8_lossy(&bytes)))
    }
}

/// Slug of a post file: its file name with the `.{extension}` suffix removed.
///
/// Returns `None` for other extensions, bare `.{extension}` names and
/// non UTF-8 names.
pub fn slug_of<'a>(path: &'a Path, extension: &str) -> Option<&'a str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    (!stem.is_empty()).then_some(stem)
}

/// Location of the post file for `slug`.
pub fn document_path(content_dir: &Path, slug: &str, extension: &str) -> PathBuf {
    content_dir.join(format!("{slug}.{extension}"))
}

/// Read the raw text of the post file for `slug`.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_raw(content_dir: &Path, slug: &str, extension: &str) -> std::io::Result<String> {
    let bytes = fs::read(document_path(content_dir, slug, extension))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_slug_of() {
        assert_eq!(slug_of(Path::new("blog/hello-world.md"), "md"), Some("hello-world"));
        assert_eq!(slug_of(Path::new("v1.2.md"), "md"), Some("v1.2"));
        assert_eq!(slug_of(Path::new("notes.txt"), "md"), None);
        assert_eq!(slug_of(Path::new("notes.mdx"), "md"), None);
        assert_eq!(slug_of(Path::new("readmemd"), "md"), None);
        assert_eq!(slug_of(Path::new(".md"), "md"), None);
    }

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(
            "first",
            "---\ntitle: Hello\ndate: 2024-01-01\ndescription: World\n---\nbody",
        );
        assert_eq!(doc.slug, "first");
        assert_eq!(doc.metadata.title, "Hello");
        assert_eq!(doc.metadata.date, "2024-01-01");
        assert_eq!(doc.metadata.description, "World");
    }

    #[test]
    fn test_parse_document_without_header() {
        let doc = Document::parse("bare", "title: not a header\n");
        assert_eq!(doc.metadata, Metadata::default());
    }

    #[test]
    fn test_read_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ai-in-sales.md");
        fs::write(&path, "---\ntitle: AI in sales\n---\n").unwrap();

        let doc = Document::read(&path, "md").unwrap();
        assert_eq!(doc.slug, "ai-in-sales");
        assert_eq!(doc.metadata.title, "AI in sales");
    }

    #[test]
    fn test_read_missing_document_fails() {
        let dir = TempDir::new().unwrap();
        let err = Document::read(&dir.path().join("gone.md"), "md").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_read_document_with_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        fs::write(&path, b"---\ntitle: Caf\xe9\ndate: 2024-01-01\n---\n").unwrap();

        let doc = Document::read(&path, "md").unwrap();
        assert_eq!(doc.metadata.title, "Caf\u{FFFD}");
        assert_eq!(doc.metadata.date, "2024-01-01");
    }

    #[test]
    fn test_read_raw_with_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), b"caf\xe9").unwrap();
        assert_eq!(read_raw(dir.path(), "a", "md").unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn test_read_raw() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "raw text").unwrap();

        assert_eq!(read_raw(dir.path(), "a", "md").unwrap(), "raw text");
        assert!(read_raw(dir.path(), "b", "md").is_err());
    }
}
