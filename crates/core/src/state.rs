// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted run state
//!
//! Two cursor fields survive across invocations in the key/value store.
//! The store is long-lived and last-write-wins; correctness depends only on
//! the stored values, never on initialization order, so absent or malformed
//! fields read as zero.

use crate::adapters::{StateStore, StateStoreError};
use crate::cursor::CursorUpdate;

/// Store key for the unix time the current cycle started
pub const KEY_LAST_RUN_START_TIME: &str = "lastRunStartTime";
/// Store key for the sweep resume cursor
pub const KEY_NEXT_INDEX: &str = "nextIndex";
/// Earlier deployments persisted the cursor under this name
pub const KEY_NEXT_INDEX_LEGACY: &str = "firstNext";

/// Cursor state loaded once per invocation and written back at most once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Unix time the current cycle started; gates fresh sweep starts
    pub last_run_start_time: u64,
    /// Sweep resume cursor; nonzero while a sweep is mid-cycle
    pub next_index: u64,
}

impl RunState {
    /// Load the state from the store, falling back to the legacy cursor key
    /// when the current one is absent
    pub async fn load(store: &dyn StateStore) -> Result<Self, StateStoreError> {
        let last_run_start_time = read_counter(store, KEY_LAST_RUN_START_TIME).await?;
        let next_index = match store.get(KEY_NEXT_INDEX).await? {
            Some(raw) => parse_counter(&raw),
            None => read_counter(store, KEY_NEXT_INDEX_LEGACY).await?,
        };
        Ok(Self {
            last_run_start_time,
            next_index,
        })
    }

    /// Write back the fields a committed run changed and return the updated
    /// state. Values are written under the current key names only; the
    /// legacy alias is never rewritten.
    pub async fn commit(
        &self,
        update: &CursorUpdate,
        store: &dyn StateStore,
    ) -> Result<Self, StateStoreError> {
        let mut next = *self;
        if let Some(start) = update.last_run_start_time {
            store
                .set(KEY_LAST_RUN_START_TIME, &start.to_string())
                .await?;
            next.last_run_start_time = start;
        }
        if let Some(index) = update.next_index {
            store.set(KEY_NEXT_INDEX, &index.to_string()).await?;
            next.next_index = index;
        }
        Ok(next)
    }
}

async fn read_counter(store: &dyn StateStore, key: &str) -> Result<u64, StateStoreError> {
    Ok(store
        .get(key)
        .await?
        .map(|raw| parse_counter(&raw))
        .unwrap_or(0))
}

fn parse_counter(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
