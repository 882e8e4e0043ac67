// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger evaluation for one invocation
//!
//! Decides from persisted state and the newcomer signal whether this
//! invocation runs at all, and whether it sweeps the feed or only drains the
//! newcomer queue. Pure; nothing here touches a collaborator.

/// Everything the trigger decision depends on
#[derive(Debug, Clone, Copy)]
pub struct TriggerInputs {
    /// Current unix time in seconds
    pub now: u64,
    /// Unix time the current cycle started
    pub last_run_start_time: u64,
    /// Persisted sweep cursor; nonzero while a sweep is mid-cycle
    pub next_index: u64,
    /// Newly-registered entries are queued upstream
    pub has_pending_newcomers: bool,
    /// Minimum seconds between sweep starts
    pub interval_secs: u64,
}

/// What kind of run this invocation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Walk the sweep window; queued newcomers ride in front
    Sweep,
    /// Drain the newcomer queue only; no sweep is due
    NewcomersOnly,
}

/// Plan for a runnable invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub kind: RunKind,
    /// The sweep cursor was at zero when this invocation started
    pub first_run_of_cycle: bool,
}

/// Outcome of trigger evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Nothing is due: no further collaborator runs, no state written
    Hold { reason: String },
    Run(RunPlan),
}

/// Decide whether this invocation runs and what it does.
///
/// A sweep that is mid-cycle always continues regardless of elapsed time,
/// so items already passed over are not revisited out of order on the next
/// timer fire. Queued newcomers jump the interval gate. Otherwise the
/// interval must have elapsed since the current cycle started.
pub fn evaluate(inputs: &TriggerInputs) -> TriggerDecision {
    let time_elapsed =
        inputs.now.saturating_sub(inputs.last_run_start_time) >= inputs.interval_secs;
    let sweep_in_progress = inputs.next_index > 0;

    if !sweep_in_progress && !inputs.has_pending_newcomers && !time_elapsed {
        return TriggerDecision::Hold {
            reason: "interval not elapsed and no pending newcomers".to_string(),
        };
    }

    let kind = if sweep_in_progress || time_elapsed {
        RunKind::Sweep
    } else {
        RunKind::NewcomersOnly
    };

    TriggerDecision::Run(RunPlan {
        kind,
        first_run_of_cycle: inputs.next_index == 0,
    })
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
