// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable record shape and the journal entries it carries.
//!
//! Every mutation `PersistentEngine` makes is first appended to the journal
//! as a `Record`, then folded into `PersistentState` by the same `apply`
//! logic used during replay — there is exactly one place that knows how a
//! `Record` changes state.

use serde::{Deserialize, Serialize};
use wfe_core::{ActivityExecution, ActivityResult, ActivityType, Decision, ProcessId, WorkflowType};

/// One durable fact. Deliberately coarser-grained than `wfe_core::Event`:
/// a `Decisions` record carries everything a `complete_decision_task` call
/// produced so replay can re-derive both the history append and the
/// broker-visible side effects (scheduling an activity, starting a child
/// process, notifying a parent) from the same code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Record {
    RegisterWorkflow(WorkflowType),
    RegisterActivity(ActivityType),
    StartProcess(wfe_core::Process),
    Signal { process_id: ProcessId, name: String, data: Option<String> },
    CancelProcess { process_id: ProcessId, details: Option<String>, reason: Option<String> },
    Decisions { process_id: ProcessId, decisions: Vec<Decision> },
    ActivityResult { process_id: ProcessId, execution: ActivityExecution, result: ActivityResult },
}

impl Record {
    fn kind(&self) -> &'static str {
        match self {
            Record::RegisterWorkflow(_) => "register_workflow",
            Record::RegisterActivity(_) => "register_activity",
            Record::StartProcess(_) => "start_process",
            Record::Signal { .. } => "signal",
            Record::CancelProcess { .. } => "cancel_process",
            Record::Decisions { .. } => "decisions",
            Record::ActivityResult { .. } => "activity_result",
        }
    }
}

/// One line of the on-disk journal: `{"kind": "...", "timestamp": ..., "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEvent {
    pub kind: String,
    pub timestamp: u64,
    pub payload: serde_json::Value,
}

impl WireEvent {
    pub fn encode(record: &Record, timestamp: u64) -> serde_json::Result<Self> {
        Ok(Self { kind: record.kind().to_string(), timestamp, payload: serde_json::to_value(record)? })
    }

    pub fn decode(self) -> serde_json::Result<Record> {
        serde_json::from_value(self.payload)
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
