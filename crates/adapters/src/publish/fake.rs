// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake content publisher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use drip_core::{ContentPublisher, PublishError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded publish request
#[derive(Debug, Clone)]
pub struct PublishCall {
    pub payload: String,
}

/// Fake publisher that records calls and can be scripted to fail
#[derive(Clone, Default)]
pub struct FakePublisher {
    calls: Arc<Mutex<Vec<PublishCall>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded publish requests
    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Script a failure for one payload
    pub fn fail_on(&self, payload: impl Into<String>, reason: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(payload.into(), reason.into());
    }

    /// Forget all scripted failures
    pub fn clear_failures(&self) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait]
impl ContentPublisher for FakePublisher {
    async fn publish(&self, payload: &str) -> Result<String, PublishError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PublishCall {
                payload: payload.to_string(),
            });

        if let Some(reason) = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(payload)
        {
            return Err(PublishError::Generation(reason.clone()));
        }

        Ok(format!("fake://artifacts/{payload}"))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
