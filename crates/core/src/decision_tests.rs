// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn schedule_activity_yields_matching_execution() {
    let decision = Decision::ScheduleActivity {
        activity: "send_email".to_string(),
        id: "act-1".to_string(),
        input: Some("hello".to_string()),
        category: None,
    };

    let execution = decision.activity_execution().expect("schedule decision has an execution");
    assert_eq!(execution.activity, "send_email");
    assert_eq!(execution.id, "act-1");
    assert_eq!(execution.input, Some("hello".to_string()));
}

#[test]
fn non_schedule_decisions_have_no_execution() {
    let decision = Decision::CompleteProcess { result: None };
    assert!(decision.activity_execution().is_none());
}

#[test]
fn serde_round_trips_through_the_tagged_shape() {
    let decision = Decision::CancelActivity { id: "act-2".to_string() };
    let json = serde_json::to_string(&decision).expect("serialize");
    assert!(json.contains("\"type\":\"cancel_activity\""));
    let back: Decision = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, decision);
}
