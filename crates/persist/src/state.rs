// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory projection rebuilt by folding the journal over `apply`.
//!
//! This is the same shape `wfe-engine::memory` keeps, reusing its
//! `Registry`/`TaskBroker` building blocks, so `PersistentEngine` differs
//! from `MemoryEngine` only in durability, not in scheduling semantics.

use crate::wire::Record;
use std::collections::HashMap;
use std::time::Instant;
use wfe_core::{ActivityExecution, ActivityType, Decision, Event, Process, ProcessId, WorkflowType};
use wfe_engine::{Registry, TaskBroker};

pub struct PersistentState {
    pub workflows: Registry<WorkflowType>,
    pub activities: Registry<ActivityType>,
    pub processes: HashMap<ProcessId, Process>,
    pub broker: TaskBroker,
}

impl PersistentState {
    pub fn new() -> Self {
        Self {
            workflows: Registry::new(),
            activities: Registry::new(),
            processes: HashMap::new(),
            broker: TaskBroker::new(),
        }
    }

    /// Fold one durable record into this projection. Used both for live
    /// mutations (after the record has been fsynced) and for replay.
    pub fn apply(&mut self, record: &Record, now: Instant, default_scheduled_timeout: std::time::Duration) {
        match record {
            Record::RegisterWorkflow(workflow) => {
                self.workflows.register(workflow.name.clone(), workflow.clone());
            }
            Record::RegisterActivity(activity) => {
                self.activities.register(activity.name.clone(), activity.clone());
            }
            Record::StartProcess(process) => {
                let process_id = process.id;
                self.broker.schedule_decision(process_id);
                self.processes.insert(process_id, process.clone());
            }
            Record::Signal { process_id, name, data } => {
                if let Some(process) = self.processes.get_mut(process_id) {
                    process.history.push(Event::Signal { name: name.clone(), data: data.clone() });
                }
                self.broker.schedule_decision(*process_id);
            }
            Record::CancelProcess { process_id, details, reason } => {
                if let Some(process) = self.processes.get_mut(process_id) {
                    process.history.push(Event::Decision(Decision::CancelProcess {
                        details: details.clone(),
                        reason: reason.clone(),
                    }));
                }
                self.broker.cancel_decision(process_id);
                self.processes.remove(process_id);
            }
            Record::Decisions { process_id, decisions } => {
                for decision in decisions {
                    self.apply_decision(*process_id, decision, now, default_scheduled_timeout);
                }
            }
            Record::ActivityResult { process_id, execution, result } => {
                if let Some(process) = self.processes.get_mut(process_id) {
                    process.history.push(Event::Activity(execution.clone(), result.clone()));
                }
                self.broker.schedule_decision(*process_id);
            }
        }
    }

    fn apply_decision(
        &mut self,
        process_id: ProcessId,
        decision: &Decision,
        now: Instant,
        default_scheduled_timeout: std::time::Duration,
    ) {
        if let Some(process) = self.processes.get_mut(&process_id) {
            process.history.push(Event::Decision(decision.clone()));
        } else {
            return;
        }

        match decision {
            Decision::ScheduleActivity { activity, id, input, category } => {
                let mut execution = ActivityExecution::new(activity.clone(), id.clone());
                if let Some(input) = input {
                    execution = execution.input(input.clone());
                }
                if let Some(category) = category {
                    execution = execution.category(category.clone());
                }
                let scheduled_timeout = self
                    .activities
                    .get(&execution.activity)
                    .map(|a| a.scheduled_timeout)
                    .unwrap_or(default_scheduled_timeout);
                self.broker.schedule_activity(execution, process_id, now + scheduled_timeout);
            }
            Decision::CancelActivity { id } => {
                if let Some((execution, _)) = self.broker.cancel_activity(id) {
                    if let Some(process) = self.processes.get_mut(&process_id) {
                        process
                            .history
                            .push(Event::Activity(execution, wfe_core::ActivityResult::canceled()));
                    }
                }
            }
            Decision::CompleteProcess { result } => {
                self.broker.cancel_decision(&process_id);
                if let Some(finished) = self.processes.remove(&process_id) {
                    if let Some(parent_id) = finished.parent {
                        self.notify_parent(
                            parent_id,
                            process_id,
                            finished.workflow,
                            finished.tags,
                            wfe_core::ChildProcessResult::Completed { result: result.clone() },
                        );
                    }
                }
            }
            Decision::CancelProcess { details, reason } => {
                self.broker.cancel_decision(&process_id);
                if let Some(finished) = self.processes.remove(&process_id) {
                    if let Some(parent_id) = finished.parent {
                        self.notify_parent(
                            parent_id,
                            process_id,
                            finished.workflow,
                            finished.tags,
                            wfe_core::ChildProcessResult::Canceled {
                                details: details.clone(),
                                reason: reason.clone(),
                            },
                        );
                    }
                }
            }
            Decision::StartChildProcess { workflow, process_id: child_id, input, tags } => {
                let mut child = Process::new(workflow.clone());
                child.id = *child_id;
                child.input = input.clone();
                child.tags = tags.clone();
                child.parent = Some(process_id);
                self.broker.schedule_decision(child.id);
                self.processes.insert(child.id, child);
            }
            Decision::Timer { delay, data } => {
                self.broker.schedule_timer(process_id, now + *delay, data.clone());
            }
        }
    }

    fn notify_parent(
        &mut self,
        parent_id: ProcessId,
        child_id: ProcessId,
        workflow: String,
        tags: Vec<String>,
        result: wfe_core::ChildProcessResult,
    ) {
        if let Some(parent) = self.processes.get_mut(&parent_id) {
            parent.history.push(Event::ChildProcess { process_id: child_id, workflow, tags, result });
            self.broker.schedule_decision(parent_id);
        }
    }

    /// After loading from a replayed journal, the broker's scheduled/running
    /// queues were never durable — reconstruct liveness by rescheduling a
    /// decision for every unfinished process and re-queuing any activities
    /// its history shows as still outstanding. A process may end up with
    /// both a decision and its old activities re-dispatched; redundant
    /// dispatch after a restart is acceptable (exactly-once activity
    /// execution is an explicit non-goal).
    pub fn reschedule_after_replay(&mut self, now: Instant, default_scheduled_timeout: std::time::Duration) {
        let process_ids: Vec<ProcessId> = self.processes.keys().copied().collect();
        for process_id in process_ids {
            let Some(process) = self.processes.get(&process_id) else { continue };
            if process.is_finished() {
                continue;
            }
            for execution in process.unfinished_activities() {
                let scheduled_timeout = self
                    .activities
                    .get(&execution.activity)
                    .map(|a| a.scheduled_timeout)
                    .unwrap_or(default_scheduled_timeout);
                self.broker.schedule_activity(execution, process_id, now + scheduled_timeout);
            }
            self.broker.schedule_decision(process_id);
        }
    }
}

impl Default for PersistentState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
