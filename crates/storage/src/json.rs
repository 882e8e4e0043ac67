// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-based state store

use async_trait::async_trait;
use drip_core::{StateStore, StateStoreError};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const STATE_FILE: &str = "run_state.json";

/// One pretty-printed JSON document per store directory.
///
/// Each `set` is a read-modify-write of the whole document: last-write-wins
/// with no transactions, which is all the cursor fields require.
#[derive(Clone)]
pub struct JsonStateStore {
    base_path: PathBuf,
}

impl JsonStateStore {
    /// Open a store at the given directory, creating it if needed
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StateStoreError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Open a temporary store for testing
    pub fn open_temp() -> Result<Self, StateStoreError> {
        let temp_dir = std::env::temp_dir().join(format!("drip-test-{}", uuid::Uuid::new_v4()));
        Self::open(temp_dir)
    }

    fn document_path(&self) -> PathBuf {
        self.base_path.join(STATE_FILE)
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, StateStoreError> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| StateStoreError::Malformed(e.to_string()))
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StateStoreError> {
        let raw = serde_json::to_string_pretty(document)
            .map_err(|e| StateStoreError::Malformed(e.to_string()))?;
        fs::write(self.document_path(), raw)?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        Ok(self.read_document()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
