// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The activity runtime: executing one dispatched `ActivityExecution`.

use async_trait::async_trait;
use std::sync::Arc;
use wfe_core::{ActivityExecution, ActivityResult, EngineResult, RunId};
use wfe_engine::Engine;

/// Lets an `ActivityHandler` extend its own heartbeat deadline while it
/// works, mirroring `pyworkflow`'s `ActivityMonitor(heartbeat_fn)`.
pub struct ActivityMonitor<E: Engine> {
    engine: Arc<E>,
    run_id: RunId,
}

impl<E: Engine> ActivityMonitor<E> {
    pub(crate) fn new(engine: Arc<E>, run_id: RunId) -> Self {
        Self { engine, run_id }
    }

    /// Extend the activity's heartbeat deadline. Errors if the run has
    /// already timed out or was never dispatched under this id.
    pub async fn heartbeat(&self) -> EngineResult<()> {
        self.engine.heartbeat_activity_task(&self.run_id).await
    }
}

/// Executes one activity's business logic and reports a terminal result.
///
/// Mirrors `execute_activity` in `pyworkflow/managed/worker/activity.py`:
/// the handler is trusted to map its own errors to `ActivityResult::failed`
/// (or `canceled`) rather than letting them escape — an `ActivityWorker`
/// only logs and moves on if `complete_activity_task` itself errors.
///
/// `None` means the handler handed the activity off to some external
/// mechanism (a human, a callback, another process) that will call
/// `complete_activity_task` itself later — mirroring `ActivityWorker.step`'s
/// `if result: self.manager.complete_task(task, result)` in the original,
/// where a falsy result means "don't complete this yet".
#[async_trait]
pub trait ActivityHandler<E: Engine>: Send + Sync {
    async fn execute(
        &self,
        execution: &ActivityExecution,
        monitor: &ActivityMonitor<E>,
    ) -> Option<ActivityResult>;
}
