// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task broker: scheduled/running queues for decisions and activities,
//! and the expiration sweep that reclaims them.
//!
//! Invariant: at most one scheduled-or-running decision entry exists per
//! process at any time. Every operation that could create a second one
//! (`schedule_decision` while one is already scheduled or running) is a
//! silent no-op, mirroring how a real decider would dedupe itself.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;
use wfe_core::{ActivityExecution, ProcessId, RunId};

struct PendingDecision {
    process_id: ProcessId,
    /// `None` means ready immediately; `Some(t)` is a `Timer` decision not
    /// due until `t`.
    ready_at: Option<Instant>,
    timer_data: Option<String>,
}

struct ScheduledActivity {
    execution: ActivityExecution,
    process_id: ProcessId,
    expires_at: Instant,
}

struct RunningDecision {
    process_id: ProcessId,
    expires_at: Instant,
}

struct RunningActivity {
    execution: ActivityExecution,
    process_id: ProcessId,
    expires_at: Instant,
    heartbeat_expires_at: Instant,
}

/// What happened when looking up a run-id to complete or heartbeat.
pub enum Lookup<T> {
    Found(T),
    /// The run-id existed but the sweeper already reclaimed it.
    TimedOut,
    /// The run-id was never issued.
    Unknown,
}

/// Activities/decisions the sweep reclaimed, for the caller to translate
/// into history events and reschedule.
#[derive(Default)]
pub struct SweepResult {
    pub timed_out_activities: Vec<(ActivityExecution, ProcessId)>,
    pub timed_out_decisions: Vec<ProcessId>,
}

/// A decision task that's come due. `timer` is set when this entry was a
/// `Timer` decision firing rather than an ordinary scheduled decision: the
/// caller must append a `Timer` history event before dispatching.
pub struct DueDecision {
    pub process_id: ProcessId,
    pub timer: Option<Option<String>>,
}

#[derive(Default)]
pub struct TaskBroker {
    scheduled_decisions: VecDeque<PendingDecision>,
    scheduled_activities: VecDeque<ScheduledActivity>,
    running_decisions: HashMap<RunId, RunningDecision>,
    running_activities: HashMap<RunId, RunningActivity>,
    timed_out_runs: HashSet<RunId>,
}

impl TaskBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_pending_decision(&self, process_id: &ProcessId) -> bool {
        self.scheduled_decisions.iter().any(|entry| &entry.process_id == process_id)
            || self.running_decisions.values().any(|entry| &entry.process_id == process_id)
    }

    /// Queue a decision task for `process_id` unless one is already
    /// scheduled or running for it.
    pub fn schedule_decision(&mut self, process_id: ProcessId) {
        if !self.has_pending_decision(&process_id) {
            self.scheduled_decisions.push_back(PendingDecision {
                process_id,
                ready_at: None,
                timer_data: None,
            });
        }
    }

    /// Queue a `Timer` decision's deferred wakeup, unless a decision is
    /// already scheduled or running for this process.
    pub fn schedule_timer(&mut self, process_id: ProcessId, due_at: Instant, data: Option<String>) {
        if !self.has_pending_decision(&process_id) {
            self.scheduled_decisions.push_back(PendingDecision {
                process_id,
                ready_at: Some(due_at),
                timer_data: data,
            });
        }
    }

    /// Drop a process's scheduled decision entry, if any (it has no running
    /// counterpart to worry about: a process being canceled mid-decision is
    /// handled by `complete_decision_task` instead).
    pub fn cancel_decision(&mut self, process_id: &ProcessId) {
        self.scheduled_decisions.retain(|entry| &entry.process_id != process_id);
    }

    pub fn schedule_activity(
        &mut self,
        execution: ActivityExecution,
        process_id: ProcessId,
        expires_at: Instant,
    ) {
        self.scheduled_activities.push_back(ScheduledActivity { execution, process_id, expires_at });
    }

    /// Remove a scheduled-or-running activity by its caller-chosen id,
    /// returning the execution and the process it belonged to.
    pub fn cancel_activity(&mut self, id: &str) -> Option<(ActivityExecution, ProcessId)> {
        if let Some(index) =
            self.scheduled_activities.iter().position(|entry| entry.execution.id == id)
        {
            let entry = self.scheduled_activities.remove(index)?;
            return Some((entry.execution, entry.process_id));
        }
        let run_id = self
            .running_activities
            .iter()
            .find(|(_, entry)| entry.execution.id == id)
            .map(|(run_id, _)| run_id.clone())?;
        let entry = self.running_activities.remove(&run_id)?;
        Some((entry.execution, entry.process_id))
    }

    /// Pop the first entry that's actually due as of `now`. Entries whose
    /// timer hasn't fired yet are skipped in place (left for a later poll),
    /// matching how an unfired timer doesn't block decisions for other
    /// processes behind it in the queue.
    pub fn dequeue_decision(&mut self, now: Instant) -> Option<DueDecision> {
        let index = self
            .scheduled_decisions
            .iter()
            .position(|entry| entry.ready_at.map(|ready_at| ready_at <= now).unwrap_or(true))?;
        let entry = self.scheduled_decisions.remove(index)?;
        Some(DueDecision {
            process_id: entry.process_id,
            timer: entry.ready_at.map(|_| entry.timer_data),
        })
    }

    pub fn dequeue_activity(&mut self) -> Option<(ActivityExecution, ProcessId)> {
        self.scheduled_activities.pop_front().map(|entry| (entry.execution, entry.process_id))
    }

    /// Pop the first scheduled activity whose execution satisfies `matches`,
    /// skipping non-matching entries in place.
    pub fn dequeue_activity_where(
        &mut self,
        mut matches: impl FnMut(&ActivityExecution) -> bool,
    ) -> Option<(ActivityExecution, ProcessId)> {
        let index = self.scheduled_activities.iter().position(|entry| matches(&entry.execution))?;
        let entry = self.scheduled_activities.remove(index)?;
        Some((entry.execution, entry.process_id))
    }

    pub fn start_running_decision(&mut self, run_id: RunId, process_id: ProcessId, expires_at: Instant) {
        self.running_decisions.insert(run_id, RunningDecision { process_id, expires_at });
    }

    pub fn start_running_activity(
        &mut self,
        run_id: RunId,
        execution: ActivityExecution,
        process_id: ProcessId,
        expires_at: Instant,
        heartbeat_expires_at: Instant,
    ) {
        self.running_activities
            .insert(run_id, RunningActivity { execution, process_id, expires_at, heartbeat_expires_at });
    }

    pub fn take_running_decision(&mut self, run_id: &RunId) -> Lookup<ProcessId> {
        if let Some(entry) = self.running_decisions.remove(run_id) {
            return Lookup::Found(entry.process_id);
        }
        if self.timed_out_runs.remove(run_id) {
            return Lookup::TimedOut;
        }
        Lookup::Unknown
    }

    pub fn take_running_activity(&mut self, run_id: &RunId) -> Lookup<(ActivityExecution, ProcessId)> {
        if let Some(entry) = self.running_activities.remove(run_id) {
            return Lookup::Found((entry.execution, entry.process_id));
        }
        if self.timed_out_runs.remove(run_id) {
            return Lookup::TimedOut;
        }
        Lookup::Unknown
    }

    /// Extend a running activity's heartbeat deadline, computed from its
    /// execution by the caller (who knows the registered heartbeat timeout).
    pub fn heartbeat_activity_with(
        &mut self,
        run_id: &RunId,
        compute_expiry: impl FnOnce(&ActivityExecution) -> Instant,
    ) -> Lookup<()> {
        if let Some(entry) = self.running_activities.get_mut(run_id) {
            entry.heartbeat_expires_at = compute_expiry(&entry.execution);
            return Lookup::Found(());
        }
        if self.timed_out_runs.contains(run_id) {
            return Lookup::TimedOut;
        }
        Lookup::Unknown
    }

    /// Reclaim anything past its expiration as of `now`.
    pub fn sweep(&mut self, now: Instant) -> SweepResult {
        let mut result = SweepResult::default();

        let mut remaining = VecDeque::new();
        while let Some(entry) = self.scheduled_activities.pop_front() {
            if entry.expires_at <= now {
                result.timed_out_activities.push((entry.execution, entry.process_id));
            } else {
                remaining.push_back(entry);
            }
        }
        self.scheduled_activities = remaining;

        let expired_run_ids: Vec<RunId> = self
            .running_activities
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now || entry.heartbeat_expires_at <= now)
            .map(|(run_id, _)| run_id.clone())
            .collect();
        for run_id in expired_run_ids {
            if let Some(entry) = self.running_activities.remove(&run_id) {
                self.timed_out_runs.insert(run_id);
                result.timed_out_activities.push((entry.execution, entry.process_id));
            }
        }

        let expired_decision_run_ids: Vec<RunId> = self
            .running_decisions
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(run_id, _)| run_id.clone())
            .collect();
        for run_id in expired_decision_run_ids {
            if let Some(entry) = self.running_decisions.remove(&run_id) {
                self.timed_out_runs.insert(run_id);
                result.timed_out_decisions.push(entry.process_id);
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;
