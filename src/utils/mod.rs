//! Utility modules shared by the extractor and the readers.

pub mod date;
pub mod slug;
