// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decisions a decider returns in response to a `DecisionTask`.
//!
//! A decider never mutates process state directly; it only returns a list of
//! `Decision`s, which `complete_decision_task` turns into appended history
//! events (and, for `ScheduleActivity`/`StartChildProcess`/`Timer`, further
//! scheduling side effects).

use crate::process::ProcessId;
use serde::{Deserialize, Serialize};

/// A single decision made in response to unseen events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Decision {
    #[serde(rename = "schedule_activity")]
    ScheduleActivity {
        activity: String,
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },

    #[serde(rename = "cancel_activity")]
    CancelActivity { id: String },

    #[serde(rename = "complete_process")]
    CompleteProcess {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },

    #[serde(rename = "cancel_process")]
    CancelProcess {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    #[serde(rename = "start_child_process")]
    StartChildProcess {
        workflow: String,
        process_id: ProcessId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    },

    #[serde(rename = "timer")]
    Timer {
        delay: std::time::Duration,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
}

impl Decision {
    /// The `ActivityExecution` this decision would schedule, if it's a
    /// `ScheduleActivity`. Mirrors what `Process::unfinished_activities`
    /// reconstructs from history.
    pub fn activity_execution(&self) -> Option<crate::activity::ActivityExecution> {
        match self {
            Decision::ScheduleActivity { activity, id, input, category } => {
                let mut execution = crate::activity::ActivityExecution::new(activity.clone(), id.clone());
                if let Some(input) = input {
                    execution = execution.input(input.clone());
                }
                if let Some(category) = category {
                    execution = execution.category(category.clone());
                }
                Some(execution)
            }
            _ => None,
        }
    }
}

crate::simple_display! {
    Decision {
        ScheduleActivity { .. } => "ScheduleActivity",
        CancelActivity { .. } => "CancelActivity",
        CompleteProcess { .. } => "CompleteProcess",
        CancelProcess { .. } => "CancelProcess",
        StartChildProcess { .. } => "StartChildProcess",
        Timer { .. } => "Timer",
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
