// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registered workflow and activity types.
//!
//! Registration is how a caller tells an `Engine` which names it's willing
//! to run and what timeouts apply; it carries no code, only configuration.
//! Any workflow/activity timeout left unset falls back to the `EngineConfig`
//! default at registration time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A registered workflow type: its name and the timeouts that apply to
/// processes started against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowType {
    pub name: String,
    pub timeout: Duration,
    pub decision_timeout: Duration,
}

impl WorkflowType {
    pub fn new(name: impl Into<String>, config: &crate::config::EngineConfig) -> Self {
        Self {
            name: name.into(),
            timeout: config.workflow_timeout,
            decision_timeout: config.decision_timeout,
        }
    }

    crate::setters! {
        set { timeout: Duration, decision_timeout: Duration }
    }
}

/// A registered activity type: its name, dispatch category, and timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    pub name: String,
    pub category: String,
    pub scheduled_timeout: Duration,
    pub execution_timeout: Duration,
    pub heartbeat_timeout: Duration,
}

impl ActivityType {
    pub fn new(name: impl Into<String>, config: &crate::config::EngineConfig) -> Self {
        Self {
            name: name.into(),
            category: config.default_category.clone(),
            scheduled_timeout: config.activity_scheduled_timeout,
            execution_timeout: config.activity_execution_timeout,
            heartbeat_timeout: config.activity_heartbeat_timeout,
        }
    }

    crate::setters! {
        into { category: String }
        set { scheduled_timeout: Duration, execution_timeout: Duration, heartbeat_timeout: Duration }
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
