// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory reference implementation of the upstream registry
//!
//! Entries occupy a growing index space the sweep cursor walks in fixed-size
//! pages, wrapping to zero past the last index. Newly registered entries
//! additionally join a FIFO newcomer queue that is surfaced ahead of the
//! sweep until a drain call clears it, so fresh entries are not starved for
//! a whole cycle.

use async_trait::async_trait;
use drip_core::{Feed, FeedError, Item, ItemId, Page, PageMode};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Entry {
    id: ItemId,
    payload: String,
    /// Cleared when the owner opts out. Invalid entries are skipped during
    /// page building, never surfaced as dead references.
    owner_valid: bool,
}

#[derive(Debug, Default)]
struct FeedInner {
    entries: Vec<Entry>,
    newcomers: VecDeque<ItemId>,
    page_size: usize,
}

/// In-memory registry backing the `Feed` trait.
///
/// Cloning shares the underlying registry, so a test can mutate the feed
/// while a scheduler holds it.
#[derive(Clone)]
pub struct MemoryFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl MemoryFeed {
    pub fn new(page_size: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FeedInner {
                entries: Vec::new(),
                newcomers: VecDeque::new(),
                page_size,
            })),
        }
    }

    /// Register an entry. A new id also joins the newcomer queue; an
    /// existing id only has its payload replaced.
    pub fn register(&self, id: impl Into<ItemId>, payload: impl Into<String>) {
        let id = id.into();
        let payload = payload.into();
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.iter_mut().find(|entry| entry.id == id) {
            entry.payload = payload;
            return;
        }
        inner.entries.push(Entry {
            id,
            payload,
            owner_valid: true,
        });
        inner.newcomers.push_back(id);
        tracing::debug!(%id, "entry registered");
    }

    /// Remove an entry from the index space and the newcomer queue
    pub fn withdraw(&self, id: impl Into<ItemId>) {
        let id = id.into();
        let mut inner = self.lock();
        inner.entries.retain(|entry| entry.id != id);
        inner.newcomers.retain(|queued| *queued != id);
    }

    /// Mark an entry's owner reference valid or invalid (opt-out)
    pub fn set_owner_valid(&self, id: impl Into<ItemId>, valid: bool) {
        let id = id.into();
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.iter_mut().find(|entry| entry.id == id) {
            entry.owner_valid = valid;
        }
    }

    /// Management endpoint: clear the named entries from the newcomer
    /// queue. Idempotent; ids no longer queued are ignored.
    pub fn apply_drain(&self, ids: &[ItemId]) {
        let mut inner = self.lock();
        inner.newcomers.retain(|queued| !ids.contains(queued));
        tracing::debug!(drained = ids.len(), "newcomer queue drained");
    }

    /// Number of registered entries
    pub fn total(&self) -> u64 {
        self.lock().entries.len() as u64
    }

    /// Number of entries still queued as newcomers
    pub fn queued_newcomers(&self) -> usize {
        self.lock().newcomers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FeedInner {
    fn entry(&self, id: ItemId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn page(&self, cursor: u64, mode: PageMode) -> Page {
        let mut items = Vec::with_capacity(self.page_size);
        let mut covered = Vec::new();

        // Newcomers ride in front of the sweep window until drained.
        // Invalid entries are not surfaced but still count as covered so
        // the drain clears them from the queue.
        for id in &self.newcomers {
            if items.len() == self.page_size {
                break;
            }
            covered.push(*id);
            if let Some(entry) = self.entry(*id) {
                if entry.owner_valid {
                    items.push(Item::new(entry.id, entry.payload.clone()));
                }
            }
        }

        let room = self.page_size - items.len();
        let total = self.entries.len() as u64;
        let mut next_cursor = cursor;

        if matches!(mode, PageMode::Full) && room > 0 {
            // Fill remaining room with swept entries. Invalid or already
            // front-loaded entries are skipped and replaced by the next
            // valid candidate so a mid-cycle page stays full.
            let start = cursor.min(total) as usize;
            let mut taken = 0;
            for entry in self.entries.iter().skip(start) {
                if taken == room {
                    break;
                }
                if !entry.owner_valid || covered.contains(&entry.id) {
                    continue;
                }
                items.push(Item::new(entry.id, entry.payload.clone()));
                taken += 1;
            }

            // The sweep window consumed `room` slots; past the end the
            // cycle is complete and the cursor wraps to zero.
            next_cursor = if cursor + room as u64 > total {
                0
            } else {
                cursor + room as u64
            };
        }

        while items.len() < self.page_size {
            items.push(Item::sentinel());
        }

        Page {
            items,
            next_cursor,
            newcomers: covered,
        }
    }
}

#[async_trait]
impl Feed for MemoryFeed {
    async fn fetch_page(&self, cursor: u64, mode: PageMode) -> Result<Page, FeedError> {
        Ok(self.lock().page(cursor, mode))
    }

    async fn has_pending_newcomers(&self) -> Result<bool, FeedError> {
        Ok(!self.lock().newcomers.is_empty())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
