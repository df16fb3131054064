// src/storage/mod.rs

//! Storage abstraction for sources and their extracted items.
//!
//! Persistence and identity assignment are the store's responsibility;
//! the scheduler and extractor only go through this trait. The bundled
//! [`MemoryStore`] backs the CLI binary and tests; a durable backend can
//! replace it as long as the contract holds.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ExtractedItem, Item, NewSource, Source, SourceId};

// Re-export for convenience
pub use memory::MemoryStore;

/// Windowed item query with an optional title filter.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    /// Number of items to skip
    pub offset: usize,

    /// Maximum number of items to return (0 means no limit)
    pub limit: usize,

    /// Case-insensitive substring the title must contain
    pub title_filter: Option<String>,
}

/// Trait for source/item storage backends.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Create a source, validating its rule and address first.
    ///
    /// Nothing is persisted when validation fails; a source with an
    /// uncompilable rule never exists. Implementations enforce this via
    /// [`NewSource::validate`].
    async fn create_source(&self, new: NewSource) -> Result<Source>;

    /// All sources in creation order.
    async fn list_sources(&self) -> Result<Vec<Source>>;

    /// Look up one source.
    async fn get_source(&self, id: SourceId) -> Result<Source>;

    /// Remove a source and its items.
    async fn delete_source(&self, id: SourceId) -> Result<()>;

    /// Atomically discard a source's items and store the new set.
    async fn replace_items(&self, id: SourceId, items: Vec<ExtractedItem>) -> Result<()>;

    /// Flag a source as broken. Idempotent.
    async fn mark_broken(&self, id: SourceId) -> Result<()>;

    /// A source's current items in extraction order.
    async fn items(&self, id: SourceId) -> Result<Vec<Item>>;

    /// A window of a source's items, optionally filtered by title.
    async fn items_page(&self, id: SourceId, query: &ItemQuery) -> Result<Vec<Item>>;
}
