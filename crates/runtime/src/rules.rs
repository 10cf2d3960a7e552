// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-based decider.
//!
//! Mirrors `pyworkflow`'s `RuleSetWorkflow`: a `Rule` pairs a predicate over
//! an event with a handler that turns it into decisions, and a `RuleSet`
//! runs every rule against every unseen event, flattening the results and
//! deduplicating while preserving first-occurrence order.

use crate::decider::Decider;
use wfe_core::{ActivityExecution, ActivityResult, ChildProcessResult, Decision, Event, Process, ProcessId};

type Predicate = Box<dyn Fn(&Event) -> bool + Send + Sync>;
type Handler = Box<dyn Fn(&Process, &Event) -> Vec<Decision> + Send + Sync>;

/// A single (predicate, handler) pair. If `predicate` matches an unseen
/// event, `handler` runs and may return zero or more decisions.
pub struct Rule {
    predicate: Predicate,
    handler: Handler,
}

impl Rule {
    pub fn new(
        predicate: impl Fn(&Event) -> bool + Send + Sync + 'static,
        handler: impl Fn(&Process, &Event) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self { predicate: Box::new(predicate), handler: Box::new(handler) }
    }

    fn apply(&self, process: &Process, event: &Event) -> Vec<Decision> {
        if (self.predicate)(event) {
            (self.handler)(process, event)
        } else {
            Vec::new()
        }
    }

    /// Fires on `Event::ProcessStarted`.
    pub fn on_process_started(
        handler: impl Fn(&Process) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self::new(|event| matches!(event, Event::ProcessStarted), move |process, _event| handler(process))
    }

    /// Fires when an activity completes, optionally filtered to one activity name.
    pub fn on_completed_activity(
        activity: Option<&'static str>,
        handler: impl Fn(&Process, &ActivityExecution, Option<&str>) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            move |event| match event {
                Event::Activity(execution, ActivityResult::Completed { .. }) => {
                    activity.map(|name| name == execution.activity).unwrap_or(true)
                }
                _ => false,
            },
            move |process, event| {
                let Event::Activity(execution, ActivityResult::Completed { result }) = event else {
                    return Vec::new();
                };
                handler(process, execution, result.as_deref())
            },
        )
    }

    /// Fires when an activity ends any way other than `Completed`
    /// (canceled, failed, or timed out), optionally filtered by name.
    pub fn on_interrupted_activity(
        activity: Option<&'static str>,
        handler: impl Fn(&Process, &ActivityExecution, &ActivityResult) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            move |event| match event {
                Event::Activity(execution, result) => {
                    result.is_interrupted() && activity.map(|name| name == execution.activity).unwrap_or(true)
                }
                _ => false,
            },
            move |process, event| {
                let Event::Activity(execution, result) = event else { return Vec::new() };
                handler(process, execution, result)
            },
        )
    }

    /// Fires on `Event::Signal`, optionally filtered to one signal name.
    pub fn on_signal(
        name: Option<&'static str>,
        handler: impl Fn(&Process, &str, Option<&str>) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            move |event| match event {
                Event::Signal { name: got, .. } => name.map(|expected| expected == got).unwrap_or(true),
                _ => false,
            },
            move |process, event| {
                let Event::Signal { name, data } = event else { return Vec::new() };
                handler(process, name, data.as_deref())
            },
        )
    }

    /// Fires on `Event::Timer`, i.e. a previously scheduled `Decision::Timer` coming due.
    pub fn on_timer(
        handler: impl Fn(&Process, Option<&str>) -> Vec<Decision> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            |event| matches!(event, Event::Timer { .. }),
            move |process, event| {
                let Event::Timer { data } = event else { return Vec::new() };
                handler(process, data.as_deref())
            },
        )
    }

    /// Fires on `Event::ChildProcess`, i.e. a child process reaching a
    /// terminal state, optionally filtered to one child workflow name.
    pub fn on_child_process(
        workflow: Option<&'static str>,
        handler: impl Fn(&Process, ProcessId, &str, &[String], &ChildProcessResult) -> Vec<Decision>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self::new(
            move |event| match event {
                Event::ChildProcess { workflow: got, .. } => {
                    workflow.map(|expected| expected == got).unwrap_or(true)
                }
                _ => false,
            },
            move |process, event| {
                let Event::ChildProcess { process_id, workflow, tags, result } = event else {
                    return Vec::new();
                };
                handler(process, *process_id, workflow, tags, result)
            },
        )
    }
}

/// An ordered collection of `Rule`s evaluated together as one `Decider`.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl Decider for RuleSet {
    fn decide(&self, process: &Process) -> Vec<Decision> {
        let mut decisions = Vec::new();
        for event in process.unseen_events() {
            for rule in &self.rules {
                for decision in rule.apply(process, event) {
                    if !decisions.contains(&decision) {
                        decisions.push(decision);
                    }
                }
            }
        }
        decisions
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
