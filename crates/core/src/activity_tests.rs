// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_execution_has_no_input_by_default() {
    let execution = ActivityExecution::new("send_email", "act-1");
    assert_eq!(execution.input, None);
}

#[test]
fn input_setter_wraps_in_some() {
    let execution = ActivityExecution::new("send_email", "act-1").input("payload");
    assert_eq!(execution.input, Some("payload".to_string()));
}

#[test]
fn only_completed_is_not_interrupted() {
    assert!(!ActivityResult::completed("ok").is_interrupted());
    assert!(ActivityResult::canceled().is_interrupted());
    assert!(ActivityResult::failed("boom").is_interrupted());
    assert!(ActivityResult::timed_out().is_interrupted());
}

#[test]
fn results_with_different_outcomes_are_not_equal() {
    assert_ne!(ActivityResult::canceled(), ActivityResult::timed_out());
}
