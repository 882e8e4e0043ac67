// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure handling, re-invocation, and state durability

use crate::prelude::*;
use drip_core::{RunOutcome, Scheduler};
use drip_storage::JsonStateStore;

#[tokio::test]
async fn publish_failure_cancels_the_run_and_keeps_state() {
    let harness = Harness::new(10);
    harness.settle(5);
    harness
        .publisher
        .fail_on("prompt-3", "completion service timed out");

    let before = harness.store.snapshot();
    let reason = unwrap_skipped(harness.run().await);

    assert!(reason.contains("completion service timed out"));
    assert_eq!(harness.store.snapshot(), before);
}

#[tokio::test]
async fn failed_item_is_retried_verbatim_next_invocation() {
    let harness = Harness::new(10);
    harness.settle(5);
    harness.publisher.fail_on("prompt-3", "flaky model");

    unwrap_skipped(harness.run().await);

    // A later invocation, same cursor, healthy publisher
    harness.publisher.clear_failures();
    let actions = unwrap_dispatched(harness.run().await);
    assert_eq!(published_ids(&actions), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn fresh_process_instance_resumes_mid_cycle() {
    let harness = Harness::new(10);
    harness.settle(15);
    unwrap_dispatched(harness.run().await);
    assert_eq!(harness.next_index(), 10);

    // Same store and feed, brand-new process state
    let reborn = harness.reincarnated();
    let actions = unwrap_dispatched(reborn.run().await);
    assert_eq!(published_ids(&actions), (11..=15).collect::<Vec<_>>());
    assert_eq!(reborn.next_index(), 0);
}

#[tokio::test]
async fn legacy_cursor_key_resumes_the_sweep() {
    let harness = Harness::new(10);
    harness.settle(15);
    harness.pin_interval();
    // State written by an earlier deployment
    harness.store.seed("firstNext", "10");

    let actions = unwrap_dispatched(harness.run().await);
    assert_eq!(published_ids(&actions), (11..=15).collect::<Vec<_>>());

    // The cursor is rewritten under the current key; the alias is left as-is
    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot.get("nextIndex").map(String::as_str), Some("0"));
    assert_eq!(snapshot.get("firstNext").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn cursor_survives_restarts_in_a_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(10);
    harness.settle(15);

    {
        let store = JsonStateStore::open(dir.path()).unwrap();
        let scheduler = Scheduler::new(
            &harness.config,
            &store,
            &harness.feed,
            &harness.publisher,
            &harness.encoder,
            &harness.clock,
        )
        .unwrap();
        let outcome = scheduler.run_once().await.unwrap();
        assert!(outcome.is_dispatched());
    }

    // New store handle over the same directory picks the cycle back up
    let store = JsonStateStore::open(dir.path()).unwrap();
    let scheduler = Scheduler::new(
        &harness.config,
        &store,
        &harness.feed,
        &harness.publisher,
        &harness.encoder,
        &harness.clock,
    )
    .unwrap();
    match scheduler.run_once().await.unwrap() {
        RunOutcome::Dispatched { actions } => {
            assert_eq!(published_ids(&actions), (11..=15).collect::<Vec<_>>());
        }
        RunOutcome::Skipped { reason } => panic!("expected dispatch, skipped: {reason}"),
    }
}
