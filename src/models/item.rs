// src/models/item.rs

//! Extracted item data structures.

use serde::{Deserialize, Serialize};

use super::SourceId;

/// An item extracted from a fetched document, before it is stored.
///
/// All fields are plain text with HTML entities already decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedItem {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// A stored item belonging to a source.
///
/// Items are derived data: every successful refresh fully replaces a
/// source's item set, so they carry no identity across refresh cycles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned identifier
    pub id: u64,

    /// Owning source
    pub source_id: SourceId,

    pub title: String,
    pub link: String,
    pub description: String,
}

impl Item {
    /// Build a stored item from an extracted one.
    pub fn from_extracted(id: u64, source_id: SourceId, extracted: ExtractedItem) -> Self {
        Self {
            id,
            source_id,
            title: extracted.title,
            link: extracted.link,
            description: extracted.description,
        }
    }
}
