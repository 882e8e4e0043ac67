// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newcomer priority and drain semantics

use crate::prelude::*;
use drip_adapters::CallPayload;
use drip_core::{Clock, ItemId};

#[tokio::test]
async fn pending_newcomers_trigger_a_run_before_the_interval() {
    let harness = Harness::new(10);
    harness.settle(10);
    harness.pin_interval();
    for id in 100..105u64 {
        harness.feed.register(id, format!("prompt-{id}"));
    }

    let actions = unwrap_dispatched(harness.run().await);

    // Drain first, then one action per newcomer
    assert_eq!(actions.len(), 6);
    assert_eq!(actions[0].target, FEED_ADDRESS);
    match decode(&actions[0]) {
        CallPayload::DrainNewcomers { ids } => {
            assert_eq!(ids, (100..105).map(ItemId::new).collect::<Vec<_>>());
        }
        other => panic!("expected drain payload, got {other:?}"),
    }
    assert_eq!(published_ids(&actions), (100..105).collect::<Vec<_>>());

    // The sweep cursor and the interval window are untouched
    assert_eq!(harness.raw_next_index(), None);
    assert_eq!(
        harness.last_run_start_time(),
        Some(harness.clock.now().to_string())
    );
}

#[tokio::test]
async fn executed_drain_settles_the_queue() {
    let harness = Harness::new(10);
    harness.pin_interval();
    harness.feed.register(7u64, "prompt-7");

    let actions = unwrap_dispatched(harness.run().await);
    harness.execute_drains(&actions);

    assert_eq!(harness.feed.queued_newcomers(), 0);
    let reason = unwrap_skipped(harness.run().await);
    assert_eq!(reason, "interval not elapsed and no pending newcomers");
}

#[tokio::test]
async fn undrained_newcomers_are_surfaced_again() {
    let harness = Harness::new(10);
    harness.pin_interval();
    harness.feed.register(7u64, "prompt-7");

    // The dispatched batch is never executed downstream; the next
    // invocation recomputes an equivalent batch from the same queue
    let first = unwrap_dispatched(harness.run().await);
    let second = unwrap_dispatched(harness.run().await);
    assert_eq!(published_ids(&first), published_ids(&second));
}

#[tokio::test]
async fn newcomers_ride_in_front_of_a_due_sweep() {
    let harness = Harness::new(10);
    harness.settle(12);
    for id in 100..102u64 {
        harness.feed.register(id, format!("prompt-{id}"));
    }

    let actions = unwrap_dispatched(harness.run().await);

    // One drain plus a full page of items, newcomers first
    assert_eq!(actions.len(), 11);
    assert_eq!(actions[0].target, FEED_ADDRESS);
    assert_eq!(
        published_ids(&actions),
        vec![100, 101, 1, 2, 3, 4, 5, 6, 7, 8]
    );
    // The sweep window advanced only over the room the newcomers left
    assert_eq!(harness.next_index(), 8);
}

#[tokio::test]
async fn opted_out_newcomer_is_drained_but_not_published() {
    let harness = Harness::new(10);
    for id in 1..=10u64 {
        harness.feed.register(id, format!("prompt-{id}"));
    }
    harness.feed.set_owner_valid(4u64, false);

    let actions = unwrap_dispatched(harness.run().await);

    // Nine publishes plus the drain covering all ten queue entries
    assert_eq!(actions.len(), 10);
    match decode(&actions[0]) {
        CallPayload::DrainNewcomers { ids } => assert_eq!(ids.len(), 10),
        other => panic!("expected drain payload, got {other:?}"),
    }
    let ids = published_ids(&actions);
    assert_eq!(ids.len(), 9);
    assert!(!ids.contains(&4));
}

#[tokio::test]
async fn oversized_newcomer_queue_drains_across_runs() {
    let harness = Harness::new(10);
    harness.pin_interval();
    for id in 1..=13u64 {
        harness.feed.register(id, format!("prompt-{id}"));
    }

    let first = unwrap_dispatched(harness.run().await);
    assert_eq!(published_ids(&first), (1..=10).collect::<Vec<_>>());
    harness.execute_drains(&first);
    assert_eq!(harness.feed.queued_newcomers(), 3);

    let second = unwrap_dispatched(harness.run().await);
    assert_eq!(published_ids(&second), (11..=13).collect::<Vec<_>>());
    harness.execute_drains(&second);
    assert_eq!(harness.feed.queued_newcomers(), 0);
}
