// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hosted-service adapter shape: an `Engine` wrapper enforcing the limits a
//! real hosted backend would (tag cardinality), delegating everything else.
//!
//! Grounded in `original_source/pyworkflow/backend/amazonswf/__init__.py`'s
//! `start_process`, which rejects more than 5 tags per process — a limit
//! this crate enforces uniformly rather than leaving to each hosted backend.

use async_trait::async_trait;
use wfe_core::{
    ActivityResult, ActivityTask, ActivityType, Decision, DecisionTask, EngineError, EngineResult,
    Process, ProcessId, RunId, WorkflowType,
};
use wfe_engine::Engine;

/// Maximum tags a hosted backend accepts per process, matching Amazon SWF's
/// `tag_list` limit.
pub const MAX_TAGS: usize = 5;

/// Wraps an `Engine` and enforces hosted-backend constraints before
/// delegating.
pub struct HostedEngine<E: Engine> {
    inner: E,
    max_tags: usize,
}

impl<E: Engine> HostedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, max_tags: MAX_TAGS }
    }

    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }
}

#[async_trait]
impl<E: Engine> Engine for HostedEngine<E> {
    async fn register_workflow(&self, workflow: WorkflowType) -> EngineResult<()> {
        self.inner.register_workflow(workflow).await
    }

    async fn register_activity(&self, activity: ActivityType) -> EngineResult<()> {
        self.inner.register_activity(activity).await
    }

    async fn start_process(&self, process: Process) -> EngineResult<ProcessId> {
        if process.tags.len() > self.max_tags {
            return Err(EngineError::InvalidInput(format!(
                "hosted backends support a maximum of {} tags per process, got {}",
                self.max_tags,
                process.tags.len()
            )));
        }
        self.inner.start_process(process).await
    }

    async fn signal_process(
        &self,
        process_id: &ProcessId,
        name: &str,
        data: Option<String>,
    ) -> EngineResult<()> {
        self.inner.signal_process(process_id, name, data).await
    }

    async fn cancel_process(
        &self,
        process_id: &ProcessId,
        details: Option<String>,
        reason: Option<String>,
    ) -> EngineResult<()> {
        self.inner.cancel_process(process_id, details, reason).await
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
        self.inner.poll_decision_task().await
    }

    async fn poll_activity_task(&self, category: &str) -> EngineResult<Option<ActivityTask>> {
        self.inner.poll_activity_task(category).await
    }

    async fn heartbeat_activity_task(&self, run_id: &RunId) -> EngineResult<()> {
        self.inner.heartbeat_activity_task(run_id).await
    }

    async fn complete_decision_task(&self, run_id: &RunId, decisions: Vec<Decision>) -> EngineResult<()> {
        self.inner.complete_decision_task(run_id, decisions).await
    }

    async fn complete_activity_task(&self, run_id: &RunId, result: ActivityResult) -> EngineResult<()> {
        self.inner.complete_activity_task(run_id, result).await
    }
}

#[cfg(test)]
#[path = "hosted_tests.rs"]
mod tests;
