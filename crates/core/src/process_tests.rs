// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::activity::{ActivityExecution, ActivityResult};
use crate::decision::Decision;

#[test]
fn fresh_process_has_one_unseen_event() {
    let process = Process::builder().build();
    assert_eq!(process.unseen_events(), &[Event::ProcessStarted]);
}

#[test]
fn unseen_events_is_the_suffix_after_the_last_decision() {
    let schedule = Decision::ScheduleActivity {
        activity: "send_email".to_string(),
        id: "act-1".to_string(),
        input: None,
        category: None,
    };
    let execution = ActivityExecution::new("send_email", "act-1");

    let process = Process::builder()
        .history(vec![
            Event::ProcessStarted,
            Event::DecisionStarted,
            Event::Decision(schedule),
            Event::ActivityStarted(execution.clone()),
            Event::Activity(execution, ActivityResult::completed("done")),
        ])
        .build();

    assert_eq!(process.unseen_events().len(), 2);
    assert!(matches!(process.unseen_events()[0], Event::ActivityStarted(_)));
    assert!(matches!(process.unseen_events()[1], Event::Activity(_, _)));
}

#[test]
fn unfinished_activities_tracks_schedule_until_result() {
    let schedule = Decision::ScheduleActivity {
        activity: "send_email".to_string(),
        id: "act-1".to_string(),
        input: None,
        category: None,
    };
    let execution = ActivityExecution::new("send_email", "act-1");

    let process = Process::builder()
        .history(vec![Event::ProcessStarted, Event::Decision(schedule)])
        .build();
    assert_eq!(process.unfinished_activities(), vec![execution.clone()]);

    let mut history = process.history.clone();
    history.push(Event::Activity(execution, ActivityResult::completed("done")));
    let finished = Process::builder().history(history).build();
    assert!(finished.unfinished_activities().is_empty());
}

#[test]
fn is_finished_true_after_complete_process_decision() {
    let process = Process::builder()
        .history(vec![
            Event::ProcessStarted,
            Event::Decision(Decision::CompleteProcess { result: None }),
        ])
        .build();
    assert!(process.is_finished());
}

#[test]
fn is_finished_false_for_a_running_process() {
    let process = Process::builder().build();
    assert!(!process.is_finished());
}
