// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::process::ProcessId;
use crate::task::RunId;

#[test]
fn new_ids_carry_their_prefix() {
    let id = ProcessId::new();
    assert!(id.as_str().starts_with("proc-"));
}

#[test]
fn from_string_round_trips() {
    let id = ProcessId::from_string("proc-abc123");
    assert_eq!(id.as_str(), "proc-abc123");
}

#[test]
fn suffix_strips_the_prefix() {
    let id = RunId::from_string("run-xyz");
    assert_eq!(id.suffix(), "xyz");
}

#[test]
fn short_truncates_the_suffix() {
    let id = RunId::from_string("run-abcdefgh");
    assert_eq!(id.short(3), "abc");
}

#[test]
fn distinct_id_types_can_share_a_suffix_without_colliding() {
    let process_id = ProcessId::from_string("proc-same");
    let run_id = RunId::from_string("run-same");
    assert_ne!(process_id.as_str(), run_id.as_str());
}

#[test]
fn ids_compare_equal_to_their_str_form() {
    let id = ProcessId::from_string("proc-eq");
    assert_eq!(id, "proc-eq");
}
