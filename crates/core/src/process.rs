// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A process: one running instance of a registered workflow and its history.

use crate::activity::ActivityExecution;
use crate::event::Event;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a process instance.
    pub struct ProcessId("proc-");
}

/// A workflow instance: its type, input, tags, parentage, and full event
/// history. Every other piece of process state (unseen events, unfinished
/// activities) is derived from `history` rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub workflow: String,
    pub id: ProcessId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ProcessId>,
    #[serde(default)]
    pub history: Vec<Event>,
}

impl Process {
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
            id: ProcessId::new(),
            input: None,
            tags: Vec::new(),
            parent: None,
            history: vec![Event::ProcessStarted],
        }
    }

    /// Events appended since the most recent `Decision` event, oldest first.
    ///
    /// A decider only ever reasons about this suffix: everything before it
    /// has already produced a decision and is settled.
    pub fn unseen_events(&self) -> &[Event] {
        let boundary = self
            .history
            .iter()
            .rposition(|event| event.decision().is_some())
            .map(|index| index + 1)
            .unwrap_or(0);
        &self.history[boundary..]
    }

    /// Activities that have been scheduled but have not yet produced a
    /// terminal `Activity` result, oldest first.
    ///
    /// Reconstructed by folding the whole history: a `ScheduleActivity`
    /// decision adds its execution, a matching `Activity` result removes it.
    pub fn unfinished_activities(&self) -> Vec<ActivityExecution> {
        let mut pending: Vec<ActivityExecution> = Vec::new();
        for event in &self.history {
            match event {
                Event::Decision(decision) => {
                    if let Some(execution) = decision.activity_execution() {
                        pending.push(execution);
                    }
                }
                Event::Activity(execution, _) => {
                    pending.retain(|pending_execution| pending_execution.id != execution.id);
                }
                _ => {}
            }
        }
        pending
    }

    /// True once history carries a terminal `CompleteProcess`/`CancelProcess`
    /// decision.
    pub fn is_finished(&self) -> bool {
        self.history.iter().any(|event| {
            matches!(
                event.decision(),
                Some(crate::decision::Decision::CompleteProcess { .. })
                    | Some(crate::decision::Decision::CancelProcess { .. })
            )
        })
    }

    crate::setters! {
        option { input: String, parent: ProcessId }
        set { tags: Vec<String> }
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct ProcessBuilder => Process {
        into { workflow: String = "test-workflow" }
        option { input: String = None, parent: ProcessId = None }
        set { tags: Vec<String> = Vec::new(), history: Vec<Event> = vec![Event::ProcessStarted] }
        computed { id: ProcessId = ProcessId::new() }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
