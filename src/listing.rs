//! Paginated post listing ("load more" / infinite scroll).
//!
//! A listing view is a pure projection of `(sorted entries, cursor)`:
//! after `cursor` load steps of `page_size` entries the view shows the
//! first `cursor * page_size` entries. [`Paginator`] walks the same
//! sequence one slice at a time for callers that append incrementally.

use crate::manifest::ManifestEntry;
use serde::Serialize;

/// Cumulative prefix of `entries` visible after `cursor` load steps.
pub fn visible(entries: &[ManifestEntry], page_size: usize, cursor: usize) -> &[ManifestEntry] {
    let end = page_size.saturating_mul(cursor).min(entries.len());
    &entries[..end]
}

/// Whether entries remain beyond the visible prefix.
pub fn has_more(entries: &[ManifestEntry], page_size: usize, cursor: usize) -> bool {
    entries.len() > page_size.saturating_mul(cursor)
}

/// One "load more" step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    /// Entries appended by this step
    pub entries: &'a [ManifestEntry],
    /// No further step will return entries
    pub end_of_list: bool,
}

/// Cursor over sorted entries, handing out one page per call.
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    entries: &'a [ManifestEntry],
    page_size: usize,
    offset: usize,
}

impl<'a> Paginator<'a> {
    /// `page_size` of zero is treated as one.
    pub fn new(entries: &'a [ManifestEntry], page_size: usize) -> Self {
        Self {
            entries,
            page_size: page_size.max(1),
            offset: 0,
        }
    }

    /// Entries not yet handed out.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.offset
    }

    /// Return the next slice.
    ///
    /// `end_of_list` is set when the slice is empty or when fewer
    /// entries remained than a full page asked for.
    pub fn load_more(&mut self) -> Page<'a> {
        let remaining = self.remaining();
        let take = self.page_size.min(remaining);
        let entries = &self.entries[self.offset..self.offset + take];
        self.offset += take;

        Page {
            entries,
            end_of_list: entries.is_empty() || self.page_size > remaining,
        }
    }

    /// Everything handed out so far.
    pub fn loaded(&self) -> &'a [ManifestEntry] {
        &self.entries[..self.offset]
    }
}
