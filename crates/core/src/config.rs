// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler configuration
//!
//! Read once per invocation. The interval gates how often a fresh sweep may
//! start; a sweep already mid-cycle continues regardless.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("feed address must not be empty")]
    MissingFeedAddress,
    #[error("publish target must not be empty")]
    MissingPublishTarget,
    #[error("page size must be nonzero")]
    ZeroPageSize,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the scheduler pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Identifier of the upstream registry; drain actions are addressed here
    pub feed_address: String,
    /// Address item actions are dispatched to
    pub publish_target: String,
    /// Fixed number of page slots per run
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Minimum time between sweep starts
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// Skip content publishing and dispatch payloads verbatim
    #[serde(default)]
    pub dry_run: bool,
}

fn default_page_size() -> usize {
    10
}

fn default_interval() -> Duration {
    Duration::from_secs(480 * 60)
}

impl SchedulerConfig {
    pub fn new(feed_address: impl Into<String>, publish_target: impl Into<String>) -> Self {
        Self {
            feed_address: feed_address.into(),
            publish_target: publish_target.into(),
            page_size: default_page_size(),
            interval: default_interval(),
            dry_run: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Check the required identifiers are present and usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_address.trim().is_empty() {
            return Err(ConfigError::MissingFeedAddress);
        }
        if self.publish_target.trim().is_empty() {
            return Err(ConfigError::MissingPublishTarget);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval.as_secs()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
