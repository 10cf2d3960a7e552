// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Engine` trait: the operations every backend (in-memory, persistent,
//! hosted) agrees to provide.

use async_trait::async_trait;
use wfe_core::{
    ActivityResult, ActivityTask, ActivityType, Decision, DecisionTask, EngineResult, Process,
    ProcessId, RunId, WorkflowType,
};

/// A workflow orchestration backend.
///
/// Implementations own process storage and task scheduling; they never run
/// decider or activity code themselves. Decision/activity execution lives in
/// `wfe-runtime`, which polls an `Engine` and completes tasks against it.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Register (or update) a workflow type's timeouts.
    async fn register_workflow(&self, workflow: WorkflowType) -> EngineResult<()>;

    /// Register (or update) an activity type's category and timeouts.
    async fn register_activity(&self, activity: ActivityType) -> EngineResult<()>;

    /// Start a new process, scheduling its first decision task.
    async fn start_process(&self, process: Process) -> EngineResult<ProcessId>;

    /// Append a signal event to a running process and schedule a decision.
    async fn signal_process(
        &self,
        process_id: &ProcessId,
        name: &str,
        data: Option<String>,
    ) -> EngineResult<()>;

    /// Append a cancellation decision event to a running process, ending it.
    async fn cancel_process(
        &self,
        process_id: &ProcessId,
        details: Option<String>,
        reason: Option<String>,
    ) -> EngineResult<()>;

    /// List running processes, optionally filtered by workflow name and/or tag.
    async fn list_processes(
        &self,
        workflow: Option<&str>,
        tag: Option<&str>,
    ) -> EngineResult<Vec<Process>>;

    /// Look up a single process by id.
    async fn process_by_id(&self, process_id: &ProcessId) -> EngineResult<Process>;

    /// Poll for the next scheduled decision task, if any.
    async fn poll_decision_task(&self) -> EngineResult<Option<DecisionTask>>;

    /// Poll for the next scheduled activity task in `category`, if any.
    async fn poll_activity_task(&self, category: &str) -> EngineResult<Option<ActivityTask>>;

    /// Extend a running activity's heartbeat deadline.
    async fn heartbeat_activity_task(&self, run_id: &RunId) -> EngineResult<()>;

    /// Apply the decisions a decider returned for a decision task.
    async fn complete_decision_task(
        &self,
        run_id: &RunId,
        decisions: Vec<Decision>,
    ) -> EngineResult<()>;

    /// Record an activity's terminal result.
    async fn complete_activity_task(
        &self,
        run_id: &RunId,
        result: ActivityResult,
    ) -> EngineResult<()>;
}
