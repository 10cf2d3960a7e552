// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wfe_core::{EngineConfig, Process};
use wfe_engine::MemoryEngine;

fn tagged(n: usize) -> Process {
    Process::builder().workflow("greet").tags((0..n).map(|i| format!("tag{i}")).collect()).build()
}

#[tokio::test]
async fn start_process_rejects_more_than_five_tags() {
    let engine = HostedEngine::new(MemoryEngine::new(EngineConfig::default()));
    engine
        .register_workflow(WorkflowType::new("greet", &EngineConfig::default()))
        .await
        .unwrap();

    assert!(engine.start_process(tagged(5)).await.is_ok());
    assert!(engine.start_process(tagged(6)).await.is_err());
}

#[tokio::test]
async fn with_max_tags_raises_the_cap() {
    let engine =
        HostedEngine::new(MemoryEngine::new(EngineConfig::default())).with_max_tags(10);
    engine
        .register_workflow(WorkflowType::new("greet", &EngineConfig::default()))
        .await
        .unwrap();

    assert!(engine.start_process(tagged(10)).await.is_ok());
}
