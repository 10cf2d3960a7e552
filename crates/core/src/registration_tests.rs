// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::EngineConfig;

#[test]
fn workflow_type_inherits_config_defaults() {
    let config = EngineConfig::default();
    let workflow = WorkflowType::new("order_fulfillment", &config);
    assert_eq!(workflow.timeout, config.workflow_timeout);
    assert_eq!(workflow.decision_timeout, config.decision_timeout);
}

#[test]
fn activity_type_inherits_config_defaults() {
    let config = EngineConfig::default();
    let activity = ActivityType::new("send_email", &config);
    assert_eq!(activity.category, config.default_category);
    assert_eq!(activity.execution_timeout, config.activity_execution_timeout);
}

#[test]
fn activity_type_setters_override_registration_defaults() {
    let config = EngineConfig::default();
    let activity = ActivityType::new("send_email", &config).category("email");
    assert_eq!(activity.category, "email");
}
