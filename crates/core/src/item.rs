// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Items, pages, and outbound actions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a feed entry. Zero is reserved for the sentinel
/// placeholder that pads fixed-size pages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ItemId(pub u64);

impl ItemId {
    pub const SENTINEL: ItemId = ItemId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A feed entry selected into a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub payload: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, payload: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }

    /// Placeholder filling an unused slot in a fixed-size page
    pub fn sentinel() -> Self {
        Self {
            id: ItemId::SENTINEL,
            payload: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_sentinel()
    }
}

/// One fixed-size window over the feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Always exactly the configured page size, sentinel-padded
    pub items: Vec<Item>,
    /// Index to resume the sweep from; zero once the sweep has wrapped
    pub next_cursor: u64,
    /// Newcomer-queue entries this page covers. They stay queued upstream
    /// until a drain action clears them.
    pub newcomers: Vec<ItemId>,
}

impl Page {
    /// How many newcomer-queue entries remain to drain for this page
    pub fn newcomer_pointer(&self) -> u64 {
        self.newcomers.len() as u64
    }

    /// Entries that carry real work (sentinel padding filtered out)
    pub fn live_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_sentinel())
    }
}

/// An opaque outbound call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: String,
    pub payload: Vec<u8>,
}

impl Action {
    pub fn new(target: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            target: target.into(),
            payload,
        }
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
