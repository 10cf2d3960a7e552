// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level smoke test: the whole stack (an `Engine`, a rule-based
//! `Decider`, and worker loops) wired together and driven to completion
//! through the public surface a real caller would use — no crate internals.

use async_trait::async_trait;
use std::sync::Arc;
use wfe_core::{
    ActivityExecution, ActivityResult, ActivityType, Decision, EngineConfig, Process, WorkflowType,
};
use wfe_engine::{Engine, MemoryEngine};
use wfe_runtime::{ActivityHandler, ActivityMonitor, ActivityWorker, DecisionWorker, Rule, RuleSet};

struct Echo;

#[async_trait]
impl ActivityHandler<MemoryEngine> for Echo {
    async fn execute(
        &self,
        execution: &ActivityExecution,
        _monitor: &ActivityMonitor<MemoryEngine>,
    ) -> Option<ActivityResult> {
        Some(ActivityResult::completed(format!(
            "charged {}",
            execution.input.clone().unwrap_or_default()
        )))
    }
}

fn order_rules() -> RuleSet {
    RuleSet::new(vec![
        Rule::on_process_started(|process| {
            vec![Decision::ScheduleActivity {
                activity: "charge_card".to_string(),
                id: "charge-1".to_string(),
                input: process.input.clone(),
                category: None,
            }]
        }),
        Rule::on_completed_activity(Some("charge_card"), |_process, _execution, result| {
            vec![Decision::CompleteProcess { result: result.map(str::to_string) }]
        }),
    ])
}

#[tokio::test]
async fn a_decider_and_an_activity_worker_drive_an_order_to_completion() {
    let engine = Arc::new(MemoryEngine::new(EngineConfig::default()));
    engine
        .register_workflow(WorkflowType::new("order", &EngineConfig::default()))
        .await
        .unwrap();
    engine
        .register_activity(ActivityType::new("charge_card", &EngineConfig::default()))
        .await
        .unwrap();

    let mut process = Process::new("order");
    process.input = Some("42.00".to_string());
    let process_id = engine.start_process(process).await.unwrap();

    let decision_worker = DecisionWorker::new(engine.clone(), order_rules());
    let activity_worker = ActivityWorker::new(engine.clone(), "default", Echo);

    // first decision: schedules the charge
    assert!(decision_worker.step().await.unwrap());
    // runs the charge
    assert!(activity_worker.step().await.unwrap());
    // second decision: sees the completed charge, completes the process
    assert!(decision_worker.step().await.unwrap());

    assert!(engine.process_by_id(&process_id).await.is_err());
    assert!(engine.list_processes(None, None).await.unwrap().is_empty());

    // nothing left to poll
    assert!(!decision_worker.step().await.unwrap());
    assert!(!activity_worker.step().await.unwrap());
}

#[tokio::test]
async fn canceling_a_process_before_its_first_decision_leaves_nothing_to_poll() {
    let engine = Arc::new(MemoryEngine::new(EngineConfig::default()));
    engine
        .register_workflow(WorkflowType::new("order", &EngineConfig::default()))
        .await
        .unwrap();
    engine
        .register_activity(ActivityType::new("charge_card", &EngineConfig::default()))
        .await
        .unwrap();

    let process_id = engine.start_process(Process::new("order")).await.unwrap();
    engine.cancel_process(&process_id, None, Some("customer request".to_string())).await.unwrap();

    // canceled before its first decision ever ran: nothing left to poll,
    // and no activity ever got scheduled to complete it later.
    let decision_worker = DecisionWorker::new(engine.clone(), order_rules());
    let activity_worker = ActivityWorker::new(engine.clone(), "default", Echo);
    assert!(!decision_worker.step().await.unwrap());
    assert!(!activity_worker.step().await.unwrap());
    assert!(engine.process_by_id(&process_id).await.is_err());
}
