// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The decider contract: pure logic over a process's unseen events.
//!
//! A decider never mutates state or talks to an `Engine` directly; it only
//! maps a `Process` to the `Decision`s a `DecisionWorker` should complete the
//! task with. `RuleSet` is the rule-based implementation in `rules`; any
//! other `decide` closure works too.

use wfe_core::{Decision, Process};

pub trait Decider: Send + Sync {
    fn decide(&self, process: &Process) -> Vec<Decision>;
}

impl<F> Decider for F
where
    F: Fn(&Process) -> Vec<Decision> + Send + Sync,
{
    fn decide(&self, process: &Process) -> Vec<Decision> {
        self(process)
    }
}
