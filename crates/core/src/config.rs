// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit engine configuration.
//!
//! The source implementation kept these as a single global `Defaults`
//! class. Per the redesign notes, this is an explicit value threaded
//! through engine construction instead of ambient global state.

use std::time::Duration;

/// Default category used when a caller doesn't specify one.
pub const DEFAULT_CATEGORY: &str = "default";

/// Category decision tasks are dispatched under.
pub const DECISION_CATEGORY: &str = "decisions";

/// Configuration for an `Engine` instance: default timeouts and categories
/// applied when a workflow/activity registration omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default workflow execution timeout (1 year per spec).
    pub workflow_timeout: Duration,
    /// Default decision task timeout.
    pub decision_timeout: Duration,
    /// Default activity scheduled (queued) timeout.
    pub activity_scheduled_timeout: Duration,
    /// Default activity execution timeout.
    pub activity_execution_timeout: Duration,
    /// Default activity heartbeat timeout.
    pub activity_heartbeat_timeout: Duration,
    /// Default category for activity/decision dispatch.
    pub default_category: String,
    /// Category decision tasks are dispatched under.
    pub decision_category: String,
    /// Maximum duration `poll_decision_task`/`poll_activity_task` may block
    /// before returning empty.
    pub poll_timeout: Duration,
}

const ONE_YEAR: Duration = Duration::from_secs(365 * 24 * 60 * 60);

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workflow_timeout: ONE_YEAR,
            decision_timeout: Duration::from_secs(60),
            activity_scheduled_timeout: ONE_YEAR,
            activity_execution_timeout: ONE_YEAR,
            activity_heartbeat_timeout: Duration::from_secs(60 * 60),
            default_category: DEFAULT_CATEGORY.to_string(),
            decision_category: DECISION_CATEGORY.to_string(),
            poll_timeout: Duration::from_secs(10),
        }
    }
}

impl EngineConfig {
    crate::setters! {
        set {
            workflow_timeout: Duration,
            decision_timeout: Duration,
            activity_scheduled_timeout: Duration,
            activity_execution_timeout: Duration,
            activity_heartbeat_timeout: Duration,
            poll_timeout: Duration,
        }
        into {
            default_category: String,
            decision_category: String,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
