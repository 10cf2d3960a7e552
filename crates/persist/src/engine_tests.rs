// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;
use wfe_core::{Decision, EngineConfig, Process};
use wfe_engine::Engine as _;

#[tokio::test]
async fn a_started_process_survives_a_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    let process_id = {
        let engine = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
        engine
            .register_workflow(WorkflowType::new("greet", &EngineConfig::default()))
            .await
            .unwrap();
        engine.start_process(Process::new("greet")).await.unwrap()
    };

    let engine = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
    let process = engine.process_by_id(&process_id).await.unwrap();
    assert_eq!(process.workflow, "greet");

    // replay reconstructed liveness: a decision task is still pollable
    let task = engine.poll_decision_task().await.unwrap().expect("rescheduled after replay");
    assert_eq!(task.process.id, process_id);
}

#[tokio::test]
async fn a_scheduled_activity_survives_a_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    {
        let engine = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
        engine
            .register_workflow(WorkflowType::new("greet", &EngineConfig::default()))
            .await
            .unwrap();
        engine
            .register_activity(ActivityType::new("send_email", &EngineConfig::default()))
            .await
            .unwrap();
        engine.start_process(Process::new("greet")).await.unwrap();
        let task = engine.poll_decision_task().await.unwrap().unwrap();
        engine
            .complete_decision_task(
                &task.context.run_id,
                vec![Decision::ScheduleActivity {
                    activity: "send_email".to_string(),
                    id: "act-1".to_string(),
                    input: None,
                    category: None,
                }],
            )
            .await
            .unwrap();
    }

    let engine = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
    let activity_task =
        engine.poll_activity_task("default").await.unwrap().expect("requeued after replay");
    assert_eq!(activity_task.execution.id, "act-1");
}

#[tokio::test]
async fn two_handles_cannot_open_the_same_journal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    let _first = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
    assert!(PersistentEngine::open(&path, EngineConfig::default()).is_err());
}

#[tokio::test]
async fn completing_an_unknown_decision_run_reports_unknown() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    let engine = PersistentEngine::open(&path, EngineConfig::default()).unwrap();
    let err = engine
        .complete_decision_task(&wfe_core::RunId::new(), Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownDecision(_)));
}
