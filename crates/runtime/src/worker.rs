// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker loops: poll, dispatch, and — when idle — sleep.
//!
//! Mirrors `pyworkflow/managed/worker/thread.py`'s `WorkerThread.run`: a
//! single top-level catch-log-continue around each step, so one bad
//! decision/activity never takes the whole worker down.

use crate::activity::{ActivityHandler, ActivityMonitor};
use crate::decider::Decider;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wfe_core::{ActivityResult, EngineResult};
use wfe_engine::Engine;

fn worker_name(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid::nanoid!(8))
}

/// Polls for decision tasks, runs a `Decider` over each, and completes them.
///
/// Mirrors `pyworkflow/managed/worker/decision.py`'s `DecisionWorker`.
pub struct DecisionWorker<E: Engine, D: Decider> {
    engine: Arc<E>,
    decider: D,
    name: String,
}

impl<E: Engine, D: Decider> DecisionWorker<E, D> {
    pub fn new(engine: Arc<E>, decider: D) -> Self {
        Self { engine, decider, name: worker_name("decision") }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Poll for and complete at most one decision task. Returns whether a
    /// task was found, mirroring `DecisionWorker.step`'s truthy return.
    pub async fn step(&self) -> EngineResult<bool> {
        let Some(task) = self.engine.poll_decision_task().await? else {
            return Ok(false);
        };
        tracing::info!(worker = %self.name, process_id = %task.process.id, "decision task started");
        let decisions = self.decider.decide(&task.process);
        tracing::info!(
            worker = %self.name,
            process_id = %task.process.id,
            count = decisions.len(),
            "decision task completed"
        );
        self.engine.complete_decision_task(&task.context.run_id, decisions).await?;
        Ok(true)
    }

    /// Poll/decide/complete forever, sleeping `idle_delay` whenever a poll
    /// comes back empty, until `stop` is set. An error from one step is
    /// logged and never stops the loop.
    pub async fn run(&self, idle_delay: Duration, stop: &AtomicBool) {
        tracing::info!(worker = %self.name, "worker started");
        while !stop.load(Ordering::Relaxed) {
            match self.step().await {
                Ok(true) => {}
                Ok(false) => tokio::time::sleep(idle_delay).await,
                Err(error) => {
                    tracing::error!(worker = %self.name, %error, "error performing decision step");
                }
            }
        }
        tracing::info!(worker = %self.name, "worker finished");
    }
}

/// Polls for activity tasks in one category and executes them with a
/// handler. Mirrors `pyworkflow/managed/worker/activity.py`'s `ActivityWorker`.
pub struct ActivityWorker<E: Engine, H: ActivityHandler<E>> {
    engine: Arc<E>,
    category: String,
    handler: H,
    name: String,
}

impl<E: Engine, H: ActivityHandler<E>> ActivityWorker<E, H> {
    pub fn new(engine: Arc<E>, category: impl Into<String>, handler: H) -> Self {
        Self { engine, category: category.into(), handler, name: worker_name("activity") }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Poll for and complete at most one activity task. Returns whether a
    /// task was found.
    pub async fn step(&self) -> EngineResult<bool> {
        let Some(task) = self.engine.poll_activity_task(&self.category).await? else {
            return Ok(false);
        };
        tracing::info!(
            worker = %self.name,
            activity = %task.execution.activity,
            id = %task.execution.id,
            "activity task started"
        );
        let monitor = ActivityMonitor::new(self.engine.clone(), task.context.run_id);
        let Some(result) = self.handler.execute(&task.execution, &monitor).await else {
            tracing::info!(
                worker = %self.name,
                activity = %task.execution.activity,
                "activity handed off, not completing"
            );
            return Ok(true);
        };
        log_result(&self.name, &task.execution.activity, &result);
        self.engine.complete_activity_task(&task.context.run_id, result).await?;
        Ok(true)
    }

    /// Poll/execute/complete forever, sleeping `idle_delay` whenever a poll
    /// comes back empty, until `stop` is set. An error from one step is
    /// logged and never stops the loop.
    pub async fn run(&self, idle_delay: Duration, stop: &AtomicBool) {
        tracing::info!(worker = %self.name, category = %self.category, "worker started");
        while !stop.load(Ordering::Relaxed) {
            match self.step().await {
                Ok(true) => {}
                Ok(false) => tokio::time::sleep(idle_delay).await,
                Err(error) => {
                    tracing::error!(worker = %self.name, %error, "error performing activity step");
                }
            }
        }
        tracing::info!(worker = %self.name, "worker finished");
    }
}

fn log_result(worker: &str, activity: &str, result: &ActivityResult) {
    match result {
        ActivityResult::Completed { .. } => {
            tracing::info!(worker, activity, "activity completed");
        }
        ActivityResult::Canceled { .. } => {
            tracing::info!(worker, activity, "activity canceled");
        }
        ActivityResult::Failed { reason, .. } => {
            tracing::warn!(worker, activity, reason = reason.as_deref().unwrap_or(""), "activity failed");
        }
        ActivityResult::TimedOut { .. } => {
            tracing::warn!(worker, activity, "activity timed out");
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
