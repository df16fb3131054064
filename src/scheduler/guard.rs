// src/scheduler/guard.rs

//! Per-source mutual exclusion for refresh runs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::SourceId;

/// Serializes refresh runs per source.
///
/// The background cycle and ad-hoc refresh tasks can both ask to refresh
/// the same source; holding the returned guard makes the second caller
/// wait until the first one's discard-then-repopulate sequence finishes.
#[derive(Default)]
pub struct RefreshGuard {
    slots: Mutex<HashMap<SourceId, Arc<Mutex<()>>>>,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other refresh for this source is running, then hold
    /// the slot until the returned guard is dropped.
    pub async fn acquire(&self, id: SourceId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(id).or_default().clone()
        };
        slot.lock_owned().await
    }
}
