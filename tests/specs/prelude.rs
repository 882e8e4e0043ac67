// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for scheduler specs

use drip_adapters::{CallPayload, FakePublisher, JsonActionEncoder, MemoryFeed};
use drip_core::{Action, Clock, FakeClock, ItemId, RunOutcome, Scheduler, SchedulerConfig};
use drip_storage::MemoryStateStore;
use std::time::Duration;

pub const FEED_ADDRESS: &str = "registry-1";
pub const PUBLISH_TARGET: &str = "hub-1";
pub const INTERVAL_SECS: u64 = 30 * 60;
/// Far enough from zero that the first invocation sees an elapsed interval
pub const START_TIME: u64 = 1_000_000;

pub struct Harness {
    pub config: SchedulerConfig,
    pub store: MemoryStateStore,
    pub feed: MemoryFeed,
    pub publisher: FakePublisher,
    pub encoder: JsonActionEncoder,
    pub clock: FakeClock,
}

impl Harness {
    pub fn new(page_size: usize) -> Self {
        Self {
            config: SchedulerConfig::new(FEED_ADDRESS, PUBLISH_TARGET)
                .with_page_size(page_size)
                .with_interval(Duration::from_secs(INTERVAL_SECS)),
            store: MemoryStateStore::new(),
            feed: MemoryFeed::new(page_size),
            publisher: FakePublisher::new(),
            encoder: JsonActionEncoder::new(FEED_ADDRESS, PUBLISH_TARGET),
            clock: FakeClock::at(START_TIME),
        }
    }

    /// A second harness over the same store and feed, as a fresh process
    /// instance would see them
    pub fn reincarnated(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            feed: self.feed.clone(),
            publisher: FakePublisher::new(),
            encoder: JsonActionEncoder::new(FEED_ADDRESS, PUBLISH_TARGET),
            clock: self.clock.clone(),
        }
    }

    /// Run one invocation; the scheduler is rebuilt each time because no
    /// in-memory state may survive between invocations
    pub async fn run(&self) -> RunOutcome {
        Scheduler::new(
            &self.config,
            &self.store,
            &self.feed,
            &self.publisher,
            &self.encoder,
            &self.clock,
        )
        .unwrap()
        .run_once()
        .await
        .unwrap()
    }

    /// Register ids 1..=count and drain the newcomer queue, leaving a
    /// settled registry for sweep-only specs
    pub fn settle(&self, count: u64) {
        let ids: Vec<ItemId> = (1..=count).map(ItemId::new).collect();
        for id in &ids {
            self.feed.register(*id, format!("prompt-{id}"));
        }
        self.feed.apply_drain(&ids);
    }

    /// Pin the interval window so only newcomers or a mid-cycle sweep can
    /// trigger a run
    pub fn pin_interval(&self) {
        self.store
            .seed("lastRunStartTime", self.clock.now().to_string());
    }

    pub fn next_index(&self) -> u64 {
        self.raw_next_index()
            .map(|raw| raw.parse().unwrap())
            .unwrap_or(0)
    }

    pub fn raw_next_index(&self) -> Option<String> {
        self.store.snapshot().get("nextIndex").cloned()
    }

    pub fn last_run_start_time(&self) -> Option<String> {
        self.store.snapshot().get("lastRunStartTime").cloned()
    }

    /// Simulate the downstream executor applying any drain actions in a
    /// dispatched batch back onto the feed
    pub fn execute_drains(&self, actions: &[Action]) {
        for action in actions {
            if let CallPayload::DrainNewcomers { ids } = decode(action) {
                self.feed.apply_drain(&ids);
            }
        }
    }
}

pub fn decode(action: &Action) -> CallPayload {
    serde_json::from_slice(&action.payload).unwrap()
}

/// Item ids published in a dispatched batch, in order
pub fn published_ids(actions: &[Action]) -> Vec<u64> {
    actions
        .iter()
        .filter_map(|action| match decode(action) {
            CallPayload::Publish { id, .. } => Some(id.0),
            CallPayload::DrainNewcomers { .. } => None,
        })
        .collect()
}

pub fn unwrap_dispatched(outcome: RunOutcome) -> Vec<Action> {
    match outcome {
        RunOutcome::Dispatched { actions } => actions,
        RunOutcome::Skipped { reason } => panic!("expected dispatch, skipped: {reason}"),
    }
}

pub fn unwrap_skipped(outcome: RunOutcome) -> String {
    match outcome {
        RunOutcome::Skipped { reason } => reason,
        RunOutcome::Dispatched { actions } => {
            panic!("expected skip, dispatched {} actions", actions.len())
        }
    }
}
