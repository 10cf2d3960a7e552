// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An activity execution and its terminal result.

use serde::{Deserialize, Serialize};

/// One dispatch of an activity: which activity, under what id, with what input.
///
/// `id` is caller-chosen (usually distinct per `ScheduleActivity` decision)
/// and is how a later `CancelActivity { id }` decision finds it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityExecution {
    pub activity: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Overrides the activity type's registered dispatch category for this
    /// one execution. Set from `Decision::ScheduleActivity.category`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ActivityExecution {
    pub fn new(activity: impl Into<String>, id: impl Into<String>) -> Self {
        Self { activity: activity.into(), id: id.into(), input: None, category: None }
    }

    crate::setters! {
        option { input: String, category: String }
    }
}

/// The terminal outcome of an `ActivityExecution`.
///
/// `Completed` is the only non-interrupted outcome; `Canceled`, `Failed` and
/// `TimedOut` all represent the activity not running to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum ActivityResult {
    Completed { result: Option<String> },
    Canceled { details: Option<String> },
    Failed { reason: Option<String>, details: Option<String> },
    TimedOut { details: Option<String> },
}

impl ActivityResult {
    pub fn completed(result: impl Into<String>) -> Self {
        Self::Completed { result: Some(result.into()) }
    }

    pub fn canceled() -> Self {
        Self::Canceled { details: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed { reason: Some(reason.into()), details: None }
    }

    pub fn timed_out() -> Self {
        Self::TimedOut { details: None }
    }

    /// True for any outcome other than `Completed`.
    pub fn is_interrupted(&self) -> bool {
        !matches!(self, ActivityResult::Completed { .. })
    }
}

crate::simple_display! {
    ActivityResult {
        Completed { .. } => "Completed",
        Canceled { .. } => "Canceled",
        Failed { .. } => "Failed",
        TimedOut { .. } => "TimedOut",
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
