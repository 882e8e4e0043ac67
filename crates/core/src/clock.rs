// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The trigger compares the current time against a persisted unix-second
//! timestamp, so the clock deals in unix seconds rather than monotonic
//! instants.

use std::sync::{Arc, Mutex};

/// A clock that provides the current unix time in whole seconds
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::at(0)
    }

    /// Create a clock starting at the given unix time
    pub fn at(secs: u64) -> Self {
        Self {
            current: Arc::new(Mutex::new(secs)),
        }
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, secs: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += secs;
    }

    /// Set the clock to a specific unix time
    pub fn set(&self, secs: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = secs;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> u64 {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
