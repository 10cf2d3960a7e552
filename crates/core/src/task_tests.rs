// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::process::Process;

#[test]
fn decision_task_carries_the_polled_process() {
    let process = Process::new("order_fulfillment");
    let task = DecisionTask::new(process.clone(), TaskContext::new(RunId::new()));
    assert_eq!(task.process.id, process.id);
}

#[test]
fn activity_task_carries_its_process_id() {
    let process_id = ProcessId::new();
    let execution = ActivityExecution::new("send_email", "act-1");
    let task = ActivityTask::new(execution, process_id, TaskContext::new(RunId::new()));
    assert_eq!(task.process_id, process_id);
}
