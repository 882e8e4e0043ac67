// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Collaborator implementations for the drip scheduler
//!
//! The in-memory feed registry, content publishers, and the JSON action
//! encoder. The scheduler itself only sees the core traits.

pub mod encode;
pub mod feed;
pub mod publish;

pub use encode::{CallPayload, JsonActionEncoder};
pub use feed::MemoryFeed;
pub use publish::HttpPublisher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use publish::{FakePublisher, PublishCall};
