// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON call encoding
//!
//! Targets are opaque addresses here, so outbound calls are encoded as
//! compact JSON payloads instead of a binary call format. Downstream
//! executors deserialize `CallPayload` to interpret a call.

use drip_core::{Action, ActionEncoder, Item, ItemId};
use serde::{Deserialize, Serialize};

/// Decoded form of an encoded action payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallPayload {
    /// Publish one item's artifact reference
    Publish { id: ItemId, content_uri: String },
    /// Clear the named entries from the upstream newcomer queue
    DrainNewcomers { ids: Vec<ItemId> },
}

/// Encodes scheduler work as JSON call payloads.
///
/// Item actions go to the publish target; drain actions go to the feed's
/// management address.
pub struct JsonActionEncoder {
    feed_address: String,
    publish_target: String,
}

impl JsonActionEncoder {
    pub fn new(feed_address: impl Into<String>, publish_target: impl Into<String>) -> Self {
        Self {
            feed_address: feed_address.into(),
            publish_target: publish_target.into(),
        }
    }
}

impl ActionEncoder for JsonActionEncoder {
    fn item_action(&self, item: &Item, content_uri: &str) -> Action {
        let payload = CallPayload::Publish {
            id: item.id,
            content_uri: content_uri.to_string(),
        };
        Action::new(&self.publish_target, encode(&payload))
    }

    fn drain_action(&self, newcomers: &[ItemId]) -> Action {
        let payload = CallPayload::DrainNewcomers {
            ids: newcomers.to_vec(),
        };
        Action::new(&self.feed_address, encode(&payload))
    }
}

fn encode(payload: &CallPayload) -> Vec<u8> {
    // Serialization of these shapes cannot fail
    serde_json::to_vec(payload).unwrap_or_default()
}

#[cfg(test)]
#[path = "encode_tests.rs"]
mod tests;
