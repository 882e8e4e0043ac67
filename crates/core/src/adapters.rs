// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator traits for external integrations
//!
//! The scheduler consumes everything outside the decision engine through
//! these narrow interfaces: the upstream feed, the durable key/value state
//! store, the content publisher, and the action encoder. Each invocation may
//! suspend on a collaborator call; the scheduler itself holds no lock and
//! performs no retries.

use crate::item::{Action, Item, ItemId, Page};
use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// State store
// =============================================================================

/// Errors from state store operations
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store document: {0}")]
    Malformed(String),
}

/// Durable string key/value store for cursor fields.
///
/// Survives across invocations. Last-write-wins, no transactions.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StateStoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError>;
}

// =============================================================================
// Feed
// =============================================================================

/// Errors from feed queries
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// Which slice of the feed a page request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Queued newcomers ride in front, swept entries fill the rest
    Full,
    /// Queued newcomers only; the sweep cursor is left where it is
    NewcomersOnly,
}

/// Read-only query interface over the upstream item registry
#[async_trait]
pub trait Feed: Send + Sync {
    /// Fetch one fixed-size page starting at `cursor`.
    ///
    /// The returned page always holds exactly the feed's page size worth of
    /// slots, sentinel-padded past the last live entry.
    async fn fetch_page(&self, cursor: u64, mode: PageMode) -> Result<Page, FeedError>;

    /// Whether newly-registered entries are still queued for priority
    /// inclusion ahead of the sweep
    async fn has_pending_newcomers(&self) -> Result<bool, FeedError>;
}

// =============================================================================
// Content publisher
// =============================================================================

/// Errors from content publishing
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("content generation failed: {0}")]
    Generation(String),
    #[error("invalid artifact metadata: {0}")]
    InvalidMetadata(String),
    #[error("artifact upload failed: {0}")]
    Upload(String),
}

/// Turns an item's payload into a published artifact reference
#[async_trait]
pub trait ContentPublisher: Send + Sync {
    async fn publish(&self, payload: &str) -> Result<String, PublishError>;
}

// =============================================================================
// Action encoder
// =============================================================================

/// Encodes selected work into opaque outbound calls
pub trait ActionEncoder: Send + Sync {
    /// Encode the publish call for one item
    fn item_action(&self, item: &Item, content_uri: &str) -> Action;

    /// Encode the management call that clears the named entries from the
    /// upstream newcomer queue
    fn drain_action(&self, newcomers: &[ItemId]) -> Action;
}

// =============================================================================
// No-op implementations
// =============================================================================

/// No-op publisher: the payload is its own reference (dry runs, tests)
pub struct NoOpPublisher;

#[async_trait]
impl ContentPublisher for NoOpPublisher {
    async fn publish(&self, payload: &str) -> Result<String, PublishError> {
        Ok(payload.to_string())
    }
}

/// No-op feed: always empty, never has newcomers
pub struct NoOpFeed {
    page_size: usize,
}

impl NoOpFeed {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }
}

#[async_trait]
impl Feed for NoOpFeed {
    async fn fetch_page(&self, _cursor: u64, _mode: PageMode) -> Result<Page, FeedError> {
        Ok(Page {
            items: std::iter::repeat_with(Item::sentinel)
                .take(self.page_size)
                .collect(),
            next_cursor: 0,
            newcomers: vec![],
        })
    }

    async fn has_pending_newcomers(&self) -> Result<bool, FeedError> {
        Ok(false)
    }
}
