// src/storage/memory.rs

//! In-memory storage implementation.
//!
//! Backs the bundled binary and the test suite. State lives in a single
//! `RwLock`, so every operation observes and produces a consistent
//! snapshot; `replace_items` in particular is atomic with respect to
//! readers.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{ExtractedItem, Item, NewSource, Source, SourceId};
use crate::storage::{ChannelStore, ItemQuery};

/// In-memory store backend.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    // BTreeMap keyed by ascending id doubles as creation order
    sources: BTreeMap<SourceId, Source>,
    items: HashMap<SourceId, Vec<Item>>,
    last_source_id: u64,
    last_item_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelStore for MemoryStore {
    async fn create_source(&self, new: NewSource) -> Result<Source> {
        new.validate()?;

        let mut state = self.state.write().await;
        state.last_source_id += 1;
        let source = Source {
            id: state.last_source_id,
            name: new.name,
            address: new.address,
            rule: new.rule,
            broken: false,
            created_at: Utc::now(),
        };
        state.sources.insert(source.id, source.clone());
        state.items.insert(source.id, Vec::new());
        Ok(source)
    }

    async fn list_sources(&self) -> Result<Vec<Source>> {
        let state = self.state.read().await;
        Ok(state.sources.values().cloned().collect())
    }

    async fn get_source(&self, id: SourceId) -> Result<Source> {
        let state = self.state.read().await;
        state
            .sources
            .get(&id)
            .cloned()
            .ok_or(AppError::SourceNotFound(id))
    }

    async fn delete_source(&self, id: SourceId) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .sources
            .remove(&id)
            .ok_or(AppError::SourceNotFound(id))?;
        state.items.remove(&id);
        Ok(())
    }

    async fn replace_items(&self, id: SourceId, items: Vec<ExtractedItem>) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.sources.contains_key(&id) {
            return Err(AppError::SourceNotFound(id));
        }
        let stored: Vec<Item> = items
            .into_iter()
            .map(|extracted| {
                state.last_item_id += 1;
                Item::from_extracted(state.last_item_id, id, extracted)
            })
            .collect();
        state.items.insert(id, stored);
        Ok(())
    }

    async fn mark_broken(&self, id: SourceId) -> Result<()> {
        let mut state = self.state.write().await;
        let source = state
            .sources
            .get_mut(&id)
            .ok_or(AppError::SourceNotFound(id))?;
        source.broken = true;
        Ok(())
    }

    async fn items(&self, id: SourceId) -> Result<Vec<Item>> {
        let state = self.state.read().await;
        if !state.sources.contains_key(&id) {
            return Err(AppError::SourceNotFound(id));
        }
        Ok(state.items.get(&id).cloned().unwrap_or_default())
    }

    async fn items_page(&self, id: SourceId, query: &ItemQuery) -> Result<Vec<Item>> {
        let all = self.items(id).await?;
        let filtered = all.into_iter().filter(|item| match &query.title_filter {
            Some(filter) => item.title.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        });
        let windowed: Vec<Item> = match query.limit {
            0 => filtered.skip(query.offset).collect(),
            limit => filtered.skip(query.offset).take(limit).collect(),
        };
        Ok(windowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rule;

    fn feed_rule() -> Rule {
        Rule {
            item_pattern: "(?s)<item>(.*?)</item>".to_string(),
            title_pattern: "<title>(.*?)</title>".to_string(),
            link_pattern: "<link>(.*?)</link>".to_string(),
            description_pattern: "<description>(.*?)</description>".to_string(),
        }
    }

    fn new_source(name: &str) -> NewSource {
        NewSource {
            name: name.to_string(),
            address: "https://example.com/feed".to_string(),
            rule: feed_rule(),
        }
    }

    fn extracted(title: &str) -> ExtractedItem {
        ExtractedItem {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            description: format!("about {title}"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_creation_order() {
        let store = MemoryStore::new();
        let first = store.create_source(new_source("one")).await.unwrap();
        let second = store.create_source(new_source("two")).await.unwrap();
        assert!(first.id < second.id);
        assert!(!first.broken);

        let listed = store.list_sources().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_create_with_bad_rule_persists_nothing() {
        let store = MemoryStore::new();
        let mut new = new_source("broken");
        new.rule.item_pattern = "(unclosed".to_string();

        assert!(store.create_source(new).await.is_err());
        assert!(store.list_sources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_bad_address_persists_nothing() {
        let store = MemoryStore::new();
        let mut new = new_source("nowhere");
        new.address = "not a url".to_string();

        assert!(store.create_source(new).await.is_err());
        assert!(store.list_sources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_items_fully_replaces() {
        let store = MemoryStore::new();
        let source = store.create_source(new_source("feed")).await.unwrap();

        store
            .replace_items(source.id, vec![extracted("a"), extracted("b")])
            .await
            .unwrap();
        store
            .replace_items(source.id, vec![extracted("c")])
            .await
            .unwrap();

        let items = store.items(source.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "c");
        assert_eq!(items[0].source_id, source.id);
    }

    #[tokio::test]
    async fn test_replace_items_unknown_source() {
        let store = MemoryStore::new();
        let result = store.replace_items(42, vec![extracted("a")]).await;
        assert!(matches!(result, Err(AppError::SourceNotFound(42))));
    }

    #[tokio::test]
    async fn test_mark_broken_is_idempotent() {
        let store = MemoryStore::new();
        let source = store.create_source(new_source("feed")).await.unwrap();

        store.mark_broken(source.id).await.unwrap();
        store.mark_broken(source.id).await.unwrap();

        assert!(store.get_source(source.id).await.unwrap().broken);
    }

    #[tokio::test]
    async fn test_delete_removes_source_and_items() {
        let store = MemoryStore::new();
        let source = store.create_source(new_source("feed")).await.unwrap();
        store
            .replace_items(source.id, vec![extracted("a")])
            .await
            .unwrap();

        store.delete_source(source.id).await.unwrap();

        assert!(matches!(
            store.get_source(source.id).await,
            Err(AppError::SourceNotFound(_))
        ));
        assert!(matches!(
            store.items(source.id).await,
            Err(AppError::SourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_items_page_window_and_filter() {
        let store = MemoryStore::new();
        let source = store.create_source(new_source("feed")).await.unwrap();
        store
            .replace_items(
                source.id,
                vec![
                    extracted("Rust release"),
                    extracted("Python notes"),
                    extracted("rustc internals"),
                    extracted("Go tips"),
                ],
            )
            .await
            .unwrap();

        let page = store
            .items_page(
                source.id,
                &ItemQuery {
                    offset: 0,
                    limit: 2,
                    title_filter: Some("rust".to_string()),
                },
            )
            .await
            .unwrap();

        let titles: Vec<&str> = page.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust release", "rustc internals"]);

        let rest = store
            .items_page(
                source.id,
                &ItemQuery {
                    offset: 2,
                    limit: 2,
                    title_filter: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].title, "rustc internals");
    }
}
