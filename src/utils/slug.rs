//! Slug validation.
//!
//! Slugs come from file names when extracting, but from the manifest
//! (hand-editable JSON) when scaffolding and from URLs when serving.
//! Before a slug is joined onto a directory it must be a single plain
//! path component.

/// Characters forbidden in slugs
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', '|', '?', '*', '#', '"', '/', '\\', '\t', '\r', '\n', '\0',
];

/// Check that a slug is safe to use as a file name stem.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(FORBIDDEN_CHARS)
}
