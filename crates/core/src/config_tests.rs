// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_workflow_timeout_is_one_year() {
    let config = EngineConfig::default();
    assert_eq!(config.workflow_timeout, Duration::from_secs(365 * 24 * 60 * 60));
}

#[test]
fn default_decision_timeout_is_sixty_seconds() {
    let config = EngineConfig::default();
    assert_eq!(config.decision_timeout, Duration::from_secs(60));
}

#[test]
fn default_categories_match_constants() {
    let config = EngineConfig::default();
    assert_eq!(config.default_category, DEFAULT_CATEGORY);
    assert_eq!(config.decision_category, DECISION_CATEGORY);
}

#[test]
fn setters_override_without_mutating_other_fields() {
    let config = EngineConfig::default()
        .decision_timeout(Duration::from_secs(5))
        .default_category("batch");

    assert_eq!(config.decision_timeout, Duration::from_secs(5));
    assert_eq!(config.default_category, "batch");
    assert_eq!(config.decision_category, DECISION_CATEGORY);
}
