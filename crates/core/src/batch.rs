// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch assembly from one fetched page
//!
//! Turns a page into the ordered outbound action batch: the drain action
//! first when the page covers queued newcomers, then one action per live
//! item in page order.

use crate::adapters::{ActionEncoder, ContentPublisher};
use crate::item::{Action, Page};

/// Result of building one action batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchResult {
    /// At least one action was assembled
    Batch {
        actions: Vec<Action>,
        /// Live item actions only; the drain action is not counted
        item_action_count: usize,
    },
    /// A publish failure cancelled the whole run
    Aborted { reason: String },
    /// Nothing to do: no live items and no newcomers to drain
    Empty,
}

/// Assembles the outbound action batch for one page
pub struct BatchBuilder<'a> {
    publisher: &'a dyn ContentPublisher,
    encoder: &'a dyn ActionEncoder,
    dry_run: bool,
}

impl<'a> BatchBuilder<'a> {
    pub fn new(publisher: &'a dyn ContentPublisher, encoder: &'a dyn ActionEncoder) -> Self {
        Self {
            publisher,
            encoder,
            dry_run: false,
        }
    }

    /// Skip publishing and use each payload verbatim as its reference
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the batch for one page.
    ///
    /// A single publish failure cancels the entire run rather than dropping
    /// one action: a partial batch could advance the persisted cursor past
    /// items that were never actually published.
    pub async fn build(&self, page: &Page) -> BatchResult {
        let mut actions = Vec::with_capacity(page.items.len() + 1);

        if !page.newcomers.is_empty() {
            actions.push(self.encoder.drain_action(&page.newcomers));
        }

        let mut item_action_count = 0;
        for item in page.live_items() {
            let content_uri = if self.dry_run {
                item.payload.clone()
            } else {
                match self.publisher.publish(&item.payload).await {
                    Ok(uri) => uri,
                    Err(e) => {
                        tracing::warn!(item = %item.id, error = %e, "publish failed, cancelling run");
                        return BatchResult::Aborted {
                            reason: e.to_string(),
                        };
                    }
                }
            };
            actions.push(self.encoder.item_action(item, &content_uri));
            item_action_count += 1;
        }

        if actions.is_empty() {
            return BatchResult::Empty;
        }

        BatchResult::Batch {
            actions,
            item_action_count,
        }
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
