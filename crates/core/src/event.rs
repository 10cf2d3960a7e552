// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The append-only history an engine builds for every process.
//!
//! A process's entire state is a fold over `Vec<Event>`: there is no other
//! place decision-affecting state lives. `Process::unseen_events` and
//! `Process::unfinished_activities` are both pure folds over this history.

use crate::activity::{ActivityExecution, ActivityResult};
use crate::decision::Decision;
use crate::process::ProcessId;
use serde::{Deserialize, Serialize};

/// The outcome of a child process as observed by its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum ChildProcessResult {
    Completed { result: Option<String> },
    Canceled { details: Option<String>, reason: Option<String> },
}

/// One entry in a process's history.
///
/// Serializes with `{"type": "event:name", ...fields}`. A history is only
/// ever appended to; nothing is ever mutated or removed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "process_started")]
    ProcessStarted,

    #[serde(rename = "decision_started")]
    DecisionStarted,

    #[serde(rename = "decision")]
    Decision(Decision),

    #[serde(rename = "activity_started")]
    ActivityStarted(ActivityExecution),

    #[serde(rename = "activity")]
    Activity(ActivityExecution, ActivityResult),

    #[serde(rename = "signal")]
    Signal { name: String, data: Option<String> },

    #[serde(rename = "timer")]
    Timer { data: Option<String> },

    #[serde(rename = "child_process")]
    ChildProcess { process_id: ProcessId, workflow: String, tags: Vec<String>, result: ChildProcessResult },
}

impl Event {
    /// The decision this event carries, if it's a `Decision` event.
    ///
    /// `unseen_events`/`unfinished_activities` both key off this rather than
    /// matching on `Event::Decision` directly, since a few other events carry
    /// decision-adjacent payloads they don't want to special-case.
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Event::Decision(d) => Some(d),
            _ => None,
        }
    }
}

crate::simple_display! {
    Event {
        ProcessStarted => "ProcessStarted",
        DecisionStarted => "DecisionStarted",
        Decision(..) => "Decision",
        ActivityStarted(..) => "ActivityStarted",
        Activity(..) => "Activity",
        Signal { .. } => "Signal",
        Timer { .. } => "Timer",
        ChildProcess { .. } => "ChildProcess",
    }
}

crate::simple_display! {
    ChildProcessResult {
        Completed { .. } => "Completed",
        Canceled { .. } => "Canceled",
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
