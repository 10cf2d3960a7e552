// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use wfe_core::{ActivityType, Decision, EngineConfig, Process};
use wfe_engine::MemoryEngine;

#[derive(Default)]
struct Counters {
    started: AtomicUsize,
    scheduled: AtomicUsize,
    completed: AtomicUsize,
}

impl Listener for Counters {
    fn on_process_started(&self, _process: &Process) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_activity_scheduled(&self, _process_id: &ProcessId, _execution: &ActivityExecution) {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
    }

    fn on_activity_task_completed(
        &self,
        _process_id: &ProcessId,
        _execution: &ActivityExecution,
        _result: &ActivityResult,
    ) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn observer_fires_listeners_after_successful_delegation() {
    let counters = Arc::new(Counters::default());
    let engine =
        Observer::new(MemoryEngine::new(EngineConfig::default())).with_listener(counters.clone());

    engine
        .register_workflow(WorkflowType::new("greet", &EngineConfig::default()))
        .await
        .unwrap();
    engine
        .register_activity(ActivityType::new("send_email", &EngineConfig::default()))
        .await
        .unwrap();

    engine.start_process(Process::new("greet")).await.unwrap();
    assert_eq!(counters.started.load(Ordering::SeqCst), 1);

    let decision_task = engine.poll_decision_task().await.unwrap().unwrap();
    engine
        .complete_decision_task(
            &decision_task.context.run_id,
            vec![Decision::ScheduleActivity {
                activity: "send_email".to_string(),
                id: "act-1".to_string(),
                input: None,
                category: None,
            }],
        )
        .await
        .unwrap();
    assert_eq!(counters.scheduled.load(Ordering::SeqCst), 1);

    let activity_task = engine.poll_activity_task("default").await.unwrap().unwrap();
    engine
        .complete_activity_task(&activity_task.context.run_id, ActivityResult::completed("ok"))
        .await
        .unwrap();
    assert_eq!(counters.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_rejected_process_emits_nothing() {
    let counters = Arc::new(Counters::default());
    let engine =
        Observer::new(MemoryEngine::new(EngineConfig::default())).with_listener(counters.clone());

    // no workflow registered: start_process fails before emitting
    assert!(engine.start_process(Process::new("unregistered")).await.is_err());
    assert_eq!(counters.started.load(Ordering::SeqCst), 0);
}
