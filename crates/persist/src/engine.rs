// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable `Engine` backend: a journal file plus the in-memory
//! projection folded from it.

use crate::state::PersistentState;
use crate::wal::Wal;
use crate::wire::Record;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use wfe_core::{
    ActivityResult, ActivityTask, ActivityType, Clock, Decision, DecisionTask, Event, EngineConfig,
    EngineError, EngineResult, Process, ProcessId, RunId, SystemClock, TaskContext, WorkflowType,
};
use wfe_engine::broker::{DueDecision, Lookup};
use wfe_engine::Engine;

/// A durable, file-backed `Engine`.
///
/// Every mutating call appends a `Record` to the journal (fsynced) before
/// updating the in-memory projection, so a crash between the two can only
/// lose the in-memory half — replayed on the next `open`.
pub struct PersistentEngine<C: Clock = SystemClock> {
    clock: C,
    config: EngineConfig,
    wal: Mutex<Wal>,
    state: Mutex<PersistentState>,
}

impl PersistentEngine<SystemClock> {
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> EngineResult<Self> {
        Self::open_with_clock(path, config, SystemClock)
    }
}

impl<C: Clock> PersistentEngine<C> {
    pub fn open_with_clock(path: impl AsRef<Path>, config: EngineConfig, clock: C) -> EngineResult<Self> {
        let wal = Wal::open(path)?;
        let mut state = PersistentState::new();
        let now = clock.now();
        for record in wal.records()? {
            state.apply(&record, now, config.activity_scheduled_timeout);
        }
        state.reschedule_after_replay(now, config.activity_scheduled_timeout);

        Ok(Self { clock, config, wal: Mutex::new(wal), state: Mutex::new(state) })
    }

    fn append(&self, record: &Record) -> EngineResult<()> {
        self.wal.lock().append(record, self.clock.epoch_ms())?;
        Ok(())
    }

    /// Reclaim anything expired. Activity timeouts append a durable history
    /// event (mirroring `complete_activity_task`); decision timeouts only
    /// reschedule the broker's ephemeral queue, since nothing about history
    /// changes when a decision task simply expires.
    fn sweep(&self) -> EngineResult<()> {
        let now = self.clock.now();
        let swept = {
            let mut state = self.state.lock();
            state.broker.sweep(now)
        };

        for (execution, process_id) in swept.timed_out_activities {
            let record = Record::ActivityResult {
                process_id,
                execution,
                result: ActivityResult::timed_out(),
            };
            self.append(&record)?;
            let mut state = self.state.lock();
            state.apply(&record, now, self.config.activity_scheduled_timeout);
        }
        for process_id in swept.timed_out_decisions {
            self.state.lock().broker.schedule_decision(process_id);
        }
        Ok(())
    }
}

fn process_exists(state: &PersistentState, process_id: &ProcessId) -> EngineResult<()> {
    if state.processes.contains_key(process_id) {
        Ok(())
    } else {
        Err(EngineError::UnknownProcess(process_id.to_string()))
    }
}

#[async_trait]
impl<C: Clock> Engine for PersistentEngine<C> {
    async fn register_workflow(&self, workflow: WorkflowType) -> EngineResult<()> {
        let record = Record::RegisterWorkflow(workflow);
        self.append(&record)?;
        self.state.lock().apply(&record, self.clock.now(), self.config.activity_scheduled_timeout);
        Ok(())
    }

    async fn register_activity(&self, activity: ActivityType) -> EngineResult<()> {
        let record = Record::RegisterActivity(activity);
        self.append(&record)?;
        self.state.lock().apply(&record, self.clock.now(), self.config.activity_scheduled_timeout);
        Ok(())
    }

    async fn start_process(&self, process: Process) -> EngineResult<ProcessId> {
        {
            let state = self.state.lock();
            if state.workflows.get(&process.workflow).is_none() {
                return Err(EngineError::InvalidInput(format!(
                    "unknown workflow type: {}",
                    process.workflow
                )));
            }
        }
        let process_id = process.id;
        let record = Record::StartProcess(process);
        self.append(&record)?;
        self.state.lock().apply(&record, self.clock.now(), self.config.activity_scheduled_timeout);
        Ok(process_id)
    }

    async fn signal_process(
        &self,
        process_id: &ProcessId,
        name: &str,
        data: Option<String>,
    ) -> EngineResult<()> {
        process_exists(&self.state.lock(), process_id)?;
        let record = Record::Signal { process_id: *process_id, name: name.to_string(), data };
        self.append(&record)?;
        self.state.lock().apply(&record, self.clock.now(), self.config.activity_scheduled_timeout);
        Ok(())
    }

    async fn cancel_process(
        &self,
        process_id: &ProcessId,
        details: Option<String>,
        reason: Option<String>,
    ) -> EngineResult<()> {
        process_exists(&self.state.lock(), process_id)?;
        let record = Record::CancelProcess { process_id: *process_id, details, reason };
        self.append(&record)?;
        self.state.lock().apply(&record, self.clock.now(), self.config.activity_scheduled_timeout);
        Ok(())
    }

    async fn list_processes(
        &self,
        workflow: Option<&str>,
        tag: Option<&str>,
    ) -> EngineResult<Vec<Process>> {
        let state = self.state.lock();
        Ok(state
            .processes
            .values()
            .filter(|process| workflow.map(|w| process.workflow == w).unwrap_or(true))
            .filter(|process| tag.map(|t| process.tags.iter().any(|owned| owned == t)).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn process_by_id(&self, process_id: &ProcessId) -> EngineResult<Process> {
        self.state
            .lock()
            .processes
            .get(process_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownProcess(process_id.to_string()))
    }

    async fn poll_decision_task(&self) -> EngineResult<Option<DecisionTask>> {
        self.sweep()?;
        let mut state = self.state.lock();
        let now = self.clock.now();

        let Some(DueDecision { process_id, timer }) = state.broker.dequeue_decision(now) else {
            return Ok(None);
        };

        let workflow_name = {
            let Some(process) = state.processes.get_mut(&process_id) else {
                return Err(EngineError::UnknownProcess(process_id.to_string()));
            };
            if let Some(data) = timer {
                process.history.push(Event::Timer { data });
            }
            process.history.push(Event::DecisionStarted);
            process.workflow.clone()
        };
        let decision_timeout = state
            .workflows
            .get(&workflow_name)
            .map(|w| w.decision_timeout)
            .unwrap_or(self.config.decision_timeout);

        let run_id = RunId::new();
        state.broker.start_running_decision(run_id, process_id, now + decision_timeout);
        let Some(process) = state.processes.get(&process_id) else {
            return Err(EngineError::UnknownProcess(process_id.to_string()));
        };
        Ok(Some(DecisionTask::new(process.clone(), TaskContext::new(run_id))))
    }

    async fn poll_activity_task(&self, category: &str) -> EngineResult<Option<ActivityTask>> {
        self.sweep()?;
        let mut state = self.state.lock();
        let now = self.clock.now();

        let activities = &state.activities;
        let dequeued = state.broker.dequeue_activity_where(|execution| {
            let effective_category = execution
                .category
                .clone()
                .or_else(|| activities.get(&execution.activity).map(|a| a.category.clone()));
            effective_category.as_deref() == Some(category)
        });
        let Some((execution, process_id)) = dequeued else {
            return Ok(None);
        };

        let activity_type = state
            .activities
            .get(&execution.activity)
            .cloned()
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown activity type: {}", execution.activity)))?;

        if let Some(process) = state.processes.get_mut(&process_id) {
            process.history.push(Event::ActivityStarted(execution.clone()));
        }

        let run_id = RunId::new();
        state.broker.start_running_activity(
            run_id,
            execution.clone(),
            process_id,
            now + activity_type.execution_timeout,
            now + activity_type.heartbeat_timeout,
        );

        Ok(Some(ActivityTask::new(execution, process_id, TaskContext::new(run_id))))
    }

    async fn heartbeat_activity_task(&self, run_id: &RunId) -> EngineResult<()> {
        self.sweep()?;
        let mut state = self.state.lock();
        let now = self.clock.now();
        let heartbeat_timeout = self.config.activity_heartbeat_timeout;
        let activities = &state.activities;
        let lookup = state.broker.heartbeat_activity_with(run_id, |execution| {
            let timeout =
                activities.get(&execution.activity).map(|a| a.heartbeat_timeout).unwrap_or(heartbeat_timeout);
            now + timeout
        });
        match lookup {
            Lookup::Found(()) => Ok(()),
            Lookup::TimedOut => Err(EngineError::TimedOut),
            Lookup::Unknown => Err(EngineError::UnknownActivity(run_id.to_string())),
        }
    }

    async fn complete_decision_task(&self, run_id: &RunId, decisions: Vec<Decision>) -> EngineResult<()> {
        self.sweep()?;
        let process_id = {
            let mut state = self.state.lock();
            match state.broker.take_running_decision(run_id) {
                Lookup::Found(process_id) => process_id,
                Lookup::TimedOut => return Err(EngineError::TimedOut),
                Lookup::Unknown => return Err(EngineError::UnknownDecision(run_id.to_string())),
            }
        };

        let record = Record::Decisions { process_id, decisions };
        self.append(&record)?;
        let now = self.clock.now();
        self.state.lock().apply(&record, now, self.config.activity_scheduled_timeout);
        Ok(())
    }

    async fn complete_activity_task(&self, run_id: &RunId, result: ActivityResult) -> EngineResult<()> {
        self.sweep()?;
        let (execution, process_id) = {
            let mut state = self.state.lock();
            match state.broker.take_running_activity(run_id) {
                Lookup::Found(found) => found,
                Lookup::TimedOut => return Err(EngineError::TimedOut),
                Lookup::Unknown => return Err(EngineError::UnknownActivity(run_id.to_string())),
            }
        };

        let record = Record::ActivityResult { process_id, execution, result };
        self.append(&record)?;
        let now = self.clock.now();
        self.state.lock().apply(&record, now, self.config.activity_scheduled_timeout);
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
