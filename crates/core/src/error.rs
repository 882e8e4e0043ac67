// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler pass

use crate::adapters::{FeedError, StateStoreError};
use thiserror::Error;

/// Failures that abort one invocation outright, with no state written.
/// The next externally-triggered invocation retries from fresh state.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("state store error: {0}")]
    Store(#[from] StateStoreError),
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
}
