// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation orchestration
//!
//! One linear pass: load state, evaluate the trigger, fetch a page, build
//! the batch, commit the cursor. Every invocation starts fresh from
//! persisted state; nothing is carried in memory between invocations, so
//! the process may be a new instance each time.

use crate::adapters::{ActionEncoder, ContentPublisher, Feed, PageMode, StateStore};
use crate::batch::{BatchBuilder, BatchResult};
use crate::clock::Clock;
use crate::config::{ConfigError, SchedulerConfig};
use crate::cursor::{self, CursorUpdate};
use crate::error::SchedulerError;
use crate::item::Action;
use crate::state::RunState;
use crate::trigger::{self, RunKind, TriggerDecision, TriggerInputs};

/// Terminal outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing dispatched this invocation
    Skipped { reason: String },
    /// Ordered batch ready for dispatch; the drain action, if any, is first
    Dispatched { actions: Vec<Action> },
}

impl RunOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, RunOutcome::Dispatched { .. })
    }
}

/// Drives one scheduler pass over the collaborators.
///
/// The state store is read once at the start of a pass and written at most
/// once at the end, after the batch build succeeded. An invocation that
/// holds performs zero persisted side effects and is always safe to abandon.
pub struct Scheduler<'a, C: Clock> {
    config: &'a SchedulerConfig,
    store: &'a dyn StateStore,
    feed: &'a dyn Feed,
    publisher: &'a dyn ContentPublisher,
    encoder: &'a dyn ActionEncoder,
    clock: &'a C,
}

impl<'a, C: Clock> Scheduler<'a, C> {
    pub fn new(
        config: &'a SchedulerConfig,
        store: &'a dyn StateStore,
        feed: &'a dyn Feed,
        publisher: &'a dyn ContentPublisher,
        encoder: &'a dyn ActionEncoder,
        clock: &'a C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            feed,
            publisher,
            encoder,
            clock,
        })
    }

    /// Run one invocation to completion
    pub async fn run_once(&self) -> Result<RunOutcome, SchedulerError> {
        let state = RunState::load(self.store).await?;
        let now = self.clock.now();
        let has_pending_newcomers = self.feed.has_pending_newcomers().await?;

        let plan = match trigger::evaluate(&TriggerInputs {
            now,
            last_run_start_time: state.last_run_start_time,
            next_index: state.next_index,
            has_pending_newcomers,
            interval_secs: self.config.interval_secs(),
        }) {
            TriggerDecision::Hold { reason } => {
                tracing::debug!(%reason, "holding this invocation");
                return Ok(RunOutcome::Skipped { reason });
            }
            TriggerDecision::Run(plan) => plan,
        };

        let mode = match plan.kind {
            RunKind::Sweep => PageMode::Full,
            RunKind::NewcomersOnly => PageMode::NewcomersOnly,
        };
        let page = self.feed.fetch_page(state.next_index, mode).await?;
        tracing::debug!(
            cursor = state.next_index,
            kind = ?plan.kind,
            next_cursor = page.next_cursor,
            newcomers = page.newcomers.len(),
            "fetched page"
        );

        let builder =
            BatchBuilder::new(self.publisher, self.encoder).dry_run(self.config.dry_run);
        match builder.build(&page).await {
            BatchResult::Aborted { reason } => {
                // Nothing written: the failed item is retried verbatim on
                // the next invocation because the cursor did not move
                Ok(RunOutcome::Skipped { reason })
            }
            BatchResult::Empty => {
                // An empty sweep page marks the end of the cycle. Clear a
                // stale mid-cycle cursor so the next invocation starts a
                // fresh sweep instead of paging past the end again.
                if plan.kind == RunKind::Sweep && state.next_index != 0 {
                    let update = CursorUpdate {
                        last_run_start_time: None,
                        next_index: Some(0),
                    };
                    state.commit(&update, self.store).await?;
                }
                Ok(RunOutcome::Skipped {
                    reason: "no items to process".to_string(),
                })
            }
            BatchResult::Batch {
                actions,
                item_action_count,
            } => {
                let update = cursor::advance(
                    plan.kind,
                    plan.first_run_of_cycle,
                    item_action_count,
                    page.next_cursor,
                    self.config.page_size,
                    now,
                );
                state.commit(&update, self.store).await?;
                tracing::info!(
                    actions = actions.len(),
                    items = item_action_count,
                    "dispatching batch"
                );
                Ok(RunOutcome::Dispatched { actions })
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
