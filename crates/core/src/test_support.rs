// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::activity::{ActivityExecution, ActivityResult};
use crate::decision::Decision;
use crate::event::Event;
use crate::process::ProcessId;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::activity::ActivityResult;
    use proptest::prelude::*;

    pub fn arb_activity_result() -> impl Strategy<Value = ActivityResult> {
        prop_oneof![
            any::<Option<String>>().prop_map(|result| ActivityResult::Completed { result }),
            any::<Option<String>>().prop_map(|details| ActivityResult::Canceled { details }),
            (any::<Option<String>>(), any::<Option<String>>())
                .prop_map(|(reason, details)| ActivityResult::Failed { reason, details }),
            any::<Option<String>>().prop_map(|details| ActivityResult::TimedOut { details }),
        ]
    }
}

// ── Decision/event factory functions ────────────────────────────────────

pub fn schedule_activity(activity: &str, id: &str) -> Decision {
    Decision::ScheduleActivity {
        activity: activity.to_string(),
        id: id.to_string(),
        input: None,
        category: None,
    }
}

pub fn complete_process(result: Option<&str>) -> Decision {
    Decision::CompleteProcess { result: result.map(str::to_string) }
}

pub fn cancel_process(reason: Option<&str>) -> Decision {
    Decision::CancelProcess { details: None, reason: reason.map(str::to_string) }
}

pub fn activity_started_event(activity: &str, id: &str) -> Event {
    Event::ActivityStarted(ActivityExecution::new(activity, id))
}

pub fn activity_completed_event(activity: &str, id: &str, result: &str) -> Event {
    Event::Activity(ActivityExecution::new(activity, id), ActivityResult::completed(result))
}

pub fn signal_event(name: &str, data: Option<&str>) -> Event {
    Event::Signal { name: name.to_string(), data: data.map(str::to_string) }
}

pub fn child_process_completed_event(
    child: ProcessId,
    workflow: &str,
    tags: &[&str],
    result: Option<&str>,
) -> Event {
    Event::ChildProcess {
        process_id: child,
        workflow: workflow.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        result: crate::event::ChildProcessResult::Completed { result: result.map(str::to_string) },
    }
}
