// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor bookkeeping for committed runs
//!
//! One decision table computes the next persisted cursor values from a
//! run's outcome. It replaces the continue-vs-reset flag checks that used to
//! be threaded through the dispatch path, and it is the only place the
//! persisted cursor fields change.

use crate::trigger::RunKind;

/// Fields of the persisted run state a committed run changes.
/// `None` means the field keeps its stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorUpdate {
    pub last_run_start_time: Option<u64>,
    pub next_index: Option<u64>,
}

impl CursorUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.last_run_start_time.is_none() && self.next_index.is_none()
    }
}

/// Decide the next persisted cursor values for a run that built at least one
/// action.
///
/// - Newcomers-only runs commit nothing: draining the queue must not move
///   the sweep cursor or restart the interval window.
/// - A sweep starting a fresh cycle stamps `last_run_start_time`, so the
///   interval is measured from cycle start rather than from each page.
/// - A short page means the sweep wrapped: the cursor resets to zero.
///   Otherwise the cursor continues at the page's resume index.
pub fn advance(
    kind: RunKind,
    first_run_of_cycle: bool,
    item_action_count: usize,
    page_next_cursor: u64,
    page_size: usize,
    now: u64,
) -> CursorUpdate {
    match kind {
        RunKind::NewcomersOnly => CursorUpdate::none(),
        RunKind::Sweep => {
            let mut update = CursorUpdate::none();
            if first_run_of_cycle {
                update.last_run_start_time = Some(now);
            }
            update.next_index = Some(if item_action_count < page_size {
                0
            } else {
                page_next_cursor
            });
            update
        }
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
