// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory state store

use async_trait::async_trait;
use drip_core::{StateStore, StateStoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mutex-guarded map store. Cloning shares the underlying map, so several
/// holders observe the same state.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before the scheduler runs (tests, migrations)
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value.into());
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
