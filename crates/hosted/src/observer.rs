// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle-event wrapper backend.
//!
//! Grounded in `original_source/pyworkflow/backend/blinker/__init__.py`'s
//! `BlinkerBackend`: every mutating call is piped straight to a parent
//! `Engine`, and only once that delegate call succeeds does `Observer` fire
//! its listeners — a delegate error emits nothing. `Listener` takes the
//! place of blinker's `Signal` objects (no pub/sub crate is in the teacher's
//! stack, so plain trait dispatch does the job).

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use wfe_core::{
    ActivityExecution, ActivityResult, ActivityTask, ActivityType, Decision, DecisionTask, Event,
    EngineResult, Process, ProcessId, RunId, WorkflowType,
};
use wfe_engine::Engine;

/// Lifecycle hooks an `Observer` invokes after a successful delegate call.
/// All methods are no-ops by default; implement only what you need.
pub trait Listener: Send + Sync {
    fn on_process_started(&self, _process: &Process) {}
    fn on_process_signaled(&self, _process_id: &ProcessId, _name: &str, _data: Option<&str>) {}
    fn on_process_canceled(&self, _process_id: &ProcessId, _details: Option<&str>, _reason: Option<&str>) {}
    fn on_decisions_completed(&self, _process_id: &ProcessId, _decisions: &[Decision]) {}
    fn on_activity_scheduled(&self, _process_id: &ProcessId, _execution: &ActivityExecution) {}
    fn on_activity_canceled(&self, _process_id: &ProcessId, _activity_id: &str) {}
    fn on_process_completed(&self, _process_id: &ProcessId, _result: Option<&str>) {}
    fn on_activity_task_completed(
        &self,
        _process_id: &ProcessId,
        _execution: &ActivityExecution,
        _result: &ActivityResult,
    ) {
    }
    fn on_activity_timed_out(&self, _process_id: &ProcessId, _execution: &ActivityExecution) {}
}

/// Wraps an `Engine`, emitting `Listener` events after each successful
/// mutating delegate call.
///
/// Run-id-to-process-id/execution bookkeeping is kept locally (the `Engine`
/// trait doesn't round-trip that context through `complete_*`) so
/// `complete_decision_task`/`complete_activity_task` can still report which
/// process/execution they affected.
pub struct Observer<E: Engine> {
    inner: E,
    listeners: Vec<Arc<dyn Listener>>,
    decision_runs: Mutex<HashMap<RunId, ProcessId>>,
    activity_runs: Mutex<HashMap<RunId, (ProcessId, ActivityExecution)>>,
}

impl<E: Engine> Observer<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            listeners: Vec::new(),
            decision_runs: Mutex::new(HashMap::new()),
            activity_runs: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn Listener>) -> Self {
        self.listeners.push(listener);
        self
    }

    fn notify(&self, f: impl Fn(&dyn Listener)) {
        for listener in &self.listeners {
            f(listener.as_ref());
        }
    }
}

#[async_trait]
impl<E: Engine> Engine for Observer<E> {
    async fn register_workflow(&self, workflow: WorkflowType) -> EngineResult<()> {
        self.inner.register_workflow(workflow).await
    }

    async fn register_activity(&self, activity: ActivityType) -> EngineResult<()> {
        self.inner.register_activity(activity).await
    }

    async fn start_process(&self, process: Process) -> EngineResult<ProcessId> {
        let process_id = self.inner.start_process(process.clone()).await?;
        self.notify(|listener| listener.on_process_started(&process));
        Ok(process_id)
    }

    async fn signal_process(
        &self,
        process_id: &ProcessId,
        name: &str,
        data: Option<String>,
    ) -> EngineResult<()> {
        self.inner.signal_process(process_id, name, data.clone()).await?;
        self.notify(|listener| listener.on_process_signaled(process_id, name, data.as_deref()));
        Ok(())
    }

    async fn cancel_process(
        &self,
        process_id: &ProcessId,
        details: Option<String>,
        reason: Option<String>,
    ) -> EngineResult<()> {
        self.inner.cancel_process(process_id, details.clone(), reason.clone()).await?;
        self.notify(|listener| {
            listener.on_process_canceled(process_id, details.as_deref(), reason.as_deref())
        });
        Ok(())
    }

    async fn list_processes(
        &self,
        workflow: Option<&str>,
        tag: Option<&str>,
    ) -> EngineResult<Vec<Process>> {
        self.inner.list_processes(workflow, tag).await
    }

    async fn process_by_id(&self, process_id: &ProcessId) -> EngineResult<Process> {
        self.inner.process_by_id(process_id).await
    }

    async fn poll_decision_task(&self) -> EngineResult<Option<DecisionTask>> {
        let task = self.inner.poll_decision_task().await?;
        let Some(task) = task else { return Ok(None) };

        for event in task.process.unseen_events() {
            if let Event::Activity(execution, result @ ActivityResult::TimedOut { .. }) = event {
                let _ = result;
                self.notify(|listener| listener.on_activity_timed_out(&task.process.id, execution));
            }
        }
        self.decision_runs.lock().insert(task.context.run_id, task.process.id);
        Ok(Some(task))
    }

    async fn poll_activity_task(&self, category: &str) -> EngineResult<Option<ActivityTask>> {
        let task = self.inner.poll_activity_task(category).await?;
        if let Some(task) = &task {
            self.activity_runs
                .lock()
                .insert(task.context.run_id, (task.process_id, task.execution.clone()));
        }
        Ok(task)
    }

    async fn heartbeat_activity_task(&self, run_id: &RunId) -> EngineResult<()> {
        self.inner.heartbeat_activity_task(run_id).await
    }

    async fn complete_decision_task(&self, run_id: &RunId, decisions: Vec<Decision>) -> EngineResult<()> {
        self.inner.complete_decision_task(run_id, decisions.clone()).await?;
        let process_id = self.decision_runs.lock().remove(run_id);
        if let Some(process_id) = process_id {
            for decision in &decisions {
                match decision {
                    Decision::ScheduleActivity { .. } => {
                        if let Some(execution) = decision.activity_execution() {
                            self.notify(|listener| listener.on_activity_scheduled(&process_id, &execution));
                        }
                    }
                    Decision::CancelActivity { id } => {
                        self.notify(|listener| listener.on_activity_canceled(&process_id, id));
                    }
                    Decision::CompleteProcess { result } => {
                        self.notify(|listener| {
                            listener.on_process_completed(&process_id, result.as_deref())
                        });
                    }
                    Decision::CancelProcess { details, reason } => {
                        self.notify(|listener| {
                            listener.on_process_canceled(&process_id, details.as_deref(), reason.as_deref())
                        });
                    }
                    _ => {}
                }
            }
            self.notify(|listener| listener.on_decisions_completed(&process_id, &decisions));
        }
        Ok(())
    }

    async fn complete_activity_task(&self, run_id: &RunId, result: ActivityResult) -> EngineResult<()> {
        self.inner.complete_activity_task(run_id, result.clone()).await?;
        let found = self.activity_runs.lock().remove(run_id);
        if let Some((process_id, execution)) = found {
            self.notify(|listener| listener.on_activity_task_completed(&process_id, &execution, &result));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
