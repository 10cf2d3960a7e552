// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-runtime: the decider runtime, activity runtime, and worker loops that
//! sit on top of an `Engine`.
//!
//! Nothing here stores state of its own — it's all poll/decide-or-execute/
//! complete against whatever `Engine` backend it's given, mirroring
//! `pyworkflow/managed`'s worker and rule-based workflow modules.

pub mod activity;
pub mod decider;
pub mod rules;
pub mod worker;

pub use activity::{ActivityHandler, ActivityMonitor};
pub use decider::Decider;
pub use rules::{Rule, RuleSet};
pub use worker::{ActivityWorker, DecisionWorker};
