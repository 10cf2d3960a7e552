// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use wfe_core::{EngineConfig, Process};

fn now() -> Instant {
    Instant::now()
}

#[test]
fn start_process_schedules_a_decision() {
    let mut state = PersistentState::new();
    let process = Process::new("greet");
    let process_id = process.id;
    state.apply(&Record::StartProcess(process), now(), Duration::from_secs(60));

    assert!(state.processes.contains_key(&process_id));
    assert!(state.broker.dequeue_decision(now()).is_some());
}

#[test]
fn completing_a_process_removes_it_and_notifies_the_parent() {
    let mut state = PersistentState::new();
    let config = EngineConfig::default();
    state.workflows.register("child", WorkflowType::new("child", &config));

    let parent = Process::new("parent");
    let parent_id = parent.id;
    state.apply(&Record::StartProcess(parent), now(), Duration::from_secs(60));
    state.broker.dequeue_decision(now());

    let child_id = ProcessId::new();
    state.apply(
        &Record::Decisions {
            process_id: parent_id,
            decisions: vec![Decision::StartChildProcess {
                workflow: "child".to_string(),
                process_id: child_id,
                input: None,
                tags: Vec::new(),
            }],
        },
        now(),
        Duration::from_secs(60),
    );
    state.broker.dequeue_decision(now()); // drain the child's own decision

    state.apply(
        &Record::Decisions {
            process_id: child_id,
            decisions: vec![Decision::CompleteProcess { result: Some("ok".to_string()) }],
        },
        now(),
        Duration::from_secs(60),
    );

    assert!(!state.processes.contains_key(&child_id));
    let due = state.broker.dequeue_decision(now()).expect("parent rescheduled");
    assert_eq!(due.process_id, parent_id);
    assert!(state.processes.get(&parent_id).unwrap().unseen_events().iter().any(|event| matches!(
        event,
        Event::ChildProcess { process_id, workflow, .. }
            if *process_id == child_id && workflow == "child"
    )));
}

#[test]
fn reschedule_after_replay_requeues_unfinished_activities_and_a_decision() {
    let mut state = PersistentState::new();
    let process = Process::new("greet");
    let process_id = process.id;
    state.apply(&Record::StartProcess(process), now(), Duration::from_secs(60));
    state.broker.dequeue_decision(now());

    state.apply(
        &Record::Decisions {
            process_id,
            decisions: vec![Decision::ScheduleActivity {
                activity: "send_email".to_string(),
                id: "act-1".to_string(),
                input: None,
                category: None,
            }],
        },
        now(),
        Duration::from_secs(60),
    );

    // simulate a restart: broker state is gone, but history survived.
    let mut fresh = PersistentState::new();
    fresh.processes.insert(process_id, state.processes.get(&process_id).unwrap().clone());
    fresh.reschedule_after_replay(now(), Duration::from_secs(60));

    assert!(fresh.broker.dequeue_activity().is_some());
    assert!(fresh.broker.dequeue_decision(now()).is_some());
}
