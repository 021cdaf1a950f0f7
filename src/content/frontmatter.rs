//! Metadata header parsing.
//!
//! A post file looks like:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-01-01
//! description: World
//! ---
//!
//! Body text...
//! ```
//!
//! The header is whatever lies between the first and second `---`.
//! Each header line is `key: value`, split on the first colon only,
//! so values such as `12:30` or URLs keep their colons.

/// Delimiter surrounding the metadata block.
pub const DELIMITER: &str = "---";

/// Recognized metadata fields. Missing keys stay empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub date: String,
    pub description: String,
}

/// Split raw file content into `(metadata block, body)`.
///
/// With fewer than two delimiters there is no metadata block and the
/// whole content is the body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let mut parts = content.splitn(3, DELIMITER);
    let _before = parts.next();
    match (parts.next(), parts.next()) {
        (Some(block), Some(body)) => (Some(block), body),
        _ => (None, content),
    }
}

/// Parse `key: value` lines into [`Metadata`].
///
/// Lines without a colon, lines with an empty key and unknown keys are
/// ignored. A repeated key keeps its last value.
pub fn parse(block: &str) -> Metadata {
    let mut meta = Metadata::default();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let slot = match key.trim() {
            "title" => &mut meta.title,
            "date" => &mut meta.date,
            "description" => &mut meta.description,
            _ => continue,
        };
        value.clone_into(slot);
    }

    meta
}

/// Strip the metadata block and the blank lines that follow it.
pub fn body(content: &str) -> &str {
    match split(content) {
        (Some(_), body) => body.trim_start_matches(['\r', '\n']),
        (None, body) => body,
    }
}
