// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory `Engine` backend. Non-durable; everything lives in one
//! `Mutex`-guarded state struct for the lifetime of the process. Intended
//! for development and tests — `wfe-persist` provides the durable
//! counterpart.

use crate::broker::{DueDecision, Lookup, TaskBroker};
use crate::registry::Registry;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use wfe_core::{
    ActivityExecution, ActivityResult, ActivityTask, ActivityType, Clock, Decision, DecisionTask, Event,
    EngineConfig, EngineError, EngineResult, Process, ProcessId, RunId, SystemClock, TaskContext,
    WorkflowType,
};

struct State {
    workflows: Registry<WorkflowType>,
    activities: Registry<ActivityType>,
    processes: HashMap<ProcessId, Process>,
    broker: TaskBroker,
}

impl State {
    fn new() -> Self {
        Self {
            workflows: Registry::new(),
            activities: Registry::new(),
            processes: HashMap::new(),
            broker: TaskBroker::new(),
        }
    }

    /// Reclaim anything expired and fold the result into process history,
    /// rescheduling decisions as needed. Run at the top of every poll and
    /// complete/heartbeat call, mirroring the source engine's
    /// `_time_out_activities`/`_time_out_decisions`.
    fn sweep(&mut self, now: std::time::Instant) {
        let swept = self.broker.sweep(now);
        for (execution, process_id) in swept.timed_out_activities {
            if let Some(process) = self.processes.get_mut(&process_id) {
                process.history.push(Event::Activity(execution, ActivityResult::timed_out()));
            }
            self.broker.schedule_decision(process_id);
        }
        for process_id in swept.timed_out_decisions {
            self.broker.schedule_decision(process_id);
        }
    }
}

/// An in-memory, non-durable `Engine`.
pub struct MemoryEngine<C: Clock = SystemClock> {
    clock: C,
    config: EngineConfig,
    state: Mutex<State>,
}

impl MemoryEngine<SystemClock> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> MemoryEngine<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        Self { clock, config, state: Mutex::new(State::new()) }
    }

    fn apply_decision(
        &self,
        state: &mut State,
        process_id: ProcessId,
        decision: Decision,
        now: std::time::Instant,
    ) -> EngineResult<()> {
        match &decision {
            Decision::ScheduleActivity { activity, id, input, category } => {
                let activity_type = state
                    .activities
                    .get(activity)
                    .ok_or_else(|| EngineError::InvalidInput(format!("unknown activity type: {activity}")))?
                    .clone();
                let mut execution = ActivityExecution::new(activity.clone(), id.clone());
                if let Some(input) = input {
                    execution = execution.input(input.clone());
                }
                if let Some(category) = category {
                    execution = execution.category(category.clone());
                }
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Decision(decision.clone()));
                let expires_at = now + activity_type.scheduled_timeout;
                state.broker.schedule_activity(execution, process_id, expires_at);
            }

            Decision::CancelActivity { id } => {
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Decision(decision.clone()));
                let (execution, _) = state
                    .broker
                    .cancel_activity(id)
                    .ok_or_else(|| EngineError::InvalidDecision(format!("cannot cancel unknown activity id: {id}")))?;
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Activity(execution, ActivityResult::canceled()));
            }

            Decision::CompleteProcess { .. } | Decision::CancelProcess { .. } => {
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Decision(decision.clone()));
                state.broker.cancel_decision(&process_id);
                if let Some(finished) = state.processes.remove(&process_id) {
                    if let Some(parent_id) = finished.parent {
                        if let Some(parent) = state.processes.get_mut(&parent_id) {
                            let result = match &decision {
                                Decision::CompleteProcess { result } => {
                                    wfe_core::ChildProcessResult::Completed { result: result.clone() }
                                }
                                Decision::CancelProcess { details, reason } => {
                                    wfe_core::ChildProcessResult::Canceled {
                                        details: details.clone(),
                                        reason: reason.clone(),
                                    }
                                }
                                _ => unreachable!("matched above"),
                            };
                            parent.history.push(Event::ChildProcess {
                                process_id,
                                workflow: finished.workflow,
                                tags: finished.tags,
                                result,
                            });
                            state.broker.schedule_decision(parent_id);
                        }
                    }
                }
            }

            Decision::StartChildProcess { workflow, process_id: child_id, input, tags } => {
                if state.workflows.get(workflow).is_none() {
                    return Err(EngineError::InvalidInput(format!("unknown workflow type: {workflow}")));
                }
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Decision(decision.clone()));

                let mut child = Process::new(workflow.clone());
                child.id = *child_id;
                child.input = input.clone();
                child.tags = tags.clone();
                child.parent = Some(process_id);
                state.broker.schedule_decision(child.id);
                state.processes.insert(child.id, child);
            }

            Decision::Timer { delay, data } => {
                let process = process_mut(state, process_id)?;
                process.history.push(Event::Decision(decision.clone()));
                state.broker.schedule_timer(process_id, now + *delay, data.clone());
            }
        }
        Ok(())
    }
}

fn process_mut(state: &mut State, process_id: ProcessId) -> EngineResult<&mut Process> {
    state.processes.get_mut(&process_id).ok_or_else(|| EngineError::UnknownProcess(process_id.to_string()))
}

#[async_trait]
impl<C: Clock> crate::engine_trait::Engine for MemoryEngine<C> {
    async fn register_workflow(&self, workflow: WorkflowType) -> EngineResult<()> {
        self.state.lock().workflows.register(workflow.name.clone(), workflow);
        Ok(())
    }

    async fn register_activity(&self, activity: ActivityType) -> EngineResult<()> {
        self.state.lock().activities.register(activity.name.clone(), activity);
        Ok(())
    }

    async fn start_process(&self, process: Process) -> EngineResult<ProcessId> {
        let mut state = self.state.lock();
        if state.workflows.get(&process.workflow).is_none() {
            return Err(EngineError::InvalidInput(format!(
                "unknown workflow type: {}",
                process.workflow
            )));
        }
        let process_id = process.id;
        state.broker.schedule_decision(process_id);
        state.processes.insert(process_id, process);
        Ok(process_id)
    }

    async fn signal_process(
        &self,
        process_id: &ProcessId,
        name: &str,
        data: Option<String>,
    ) -> EngineResult<()> {
        let mut state = self.state.lock();
        let process = process_mut(&mut state, *process_id)?;
        process.history.push(Event::Signal { name: name.to_string(), data });
        state.broker.schedule_decision(*process_id);
        Ok(())
    }

    async fn cancel_process(
        &self,
        process_id: &ProcessId,
        details: Option<String>,
        reason: Option<String>,
    ) -> EngineResult<()> {
        let mut state = self.state.lock();
        let process = process_mut(&mut state, *process_id)?;
        process.history.push(Event::Decision(Decision::CancelProcess { details, reason }));
        state.broker.cancel_decision(process_id);
        state.processes.remove(process_id);
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
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.sweep(now);

        let Some(DueDecision { process_id, timer }) = state.broker.dequeue_decision(now) else {
            return Ok(None);
        };

        let workflow_name = {
            let process = process_mut(&mut state, process_id)?;
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
        let process = process_mut(&mut state, process_id)?.clone();
        Ok(Some(DecisionTask::new(process, TaskContext::new(run_id))))
    }

    async fn poll_activity_task(&self, category: &str) -> EngineResult<Option<ActivityTask>> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.sweep(now);

        let activities = &state.activities;
        let dequeued = state.broker.dequeue_activity_where(|execution| {
            let effective_category = execution.category.clone().or_else(|| {
                activities.get(&execution.activity).map(|a| a.category.clone())
            });
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

        let process = process_mut(&mut state, process_id)?;
        process.history.push(Event::ActivityStarted(execution.clone()));

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
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.sweep(now);

        let heartbeat_timeout = self.config.activity_heartbeat_timeout;
        let activities = &state.activities;
        let lookup = state.broker.heartbeat_activity_with(run_id, |execution| {
            let timeout = activities.get(&execution.activity).map(|a| a.heartbeat_timeout).unwrap_or(heartbeat_timeout);
            now + timeout
        });
        match lookup {
            Lookup::Found(()) => Ok(()),
            Lookup::TimedOut => Err(EngineError::TimedOut),
            Lookup::Unknown => Err(EngineError::UnknownActivity(run_id.to_string())),
        }
    }

    async fn complete_decision_task(&self, run_id: &RunId, decisions: Vec<Decision>) -> EngineResult<()> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.sweep(now);

        let process_id = match state.broker.take_running_decision(run_id) {
            Lookup::Found(process_id) => process_id,
            Lookup::TimedOut => return Err(EngineError::TimedOut),
            Lookup::Unknown => return Err(EngineError::UnknownDecision(run_id.to_string())),
        };

        for decision in decisions {
            self.apply_decision(&mut state, process_id, decision, now)?;
        }
        Ok(())
    }

    async fn complete_activity_task(&self, run_id: &RunId, result: ActivityResult) -> EngineResult<()> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.sweep(now);

        let (execution, process_id) = match state.broker.take_running_activity(run_id) {
            Lookup::Found(found) => found,
            Lookup::TimedOut => return Err(EngineError::TimedOut),
            Lookup::Unknown => return Err(EngineError::UnknownActivity(run_id.to_string())),
        };

        let process = process_mut(&mut state, process_id)?;
        process.history.push(Event::Activity(execution, result));
        state.broker.schedule_decision(process_id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod scenario_tests;
