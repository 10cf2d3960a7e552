// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wfe_core::{EngineConfig, ProcessId};

#[test]
fn encode_decode_round_trips() {
    let process_id = ProcessId::new();
    let record = Record::Signal { process_id, name: "wake".to_string(), data: None };
    let wire = WireEvent::encode(&record, 1_000).unwrap();
    assert_eq!(wire.kind, "signal");
    assert_eq!(wire.timestamp, 1_000);

    let decoded = wire.decode().unwrap();
    assert!(matches!(decoded, Record::Signal { process_id: p, .. } if p == process_id));
}

#[test]
fn kind_matches_variant() {
    let config = EngineConfig::default();
    let record = Record::RegisterWorkflow(WorkflowType::new("greet", &config));
    assert_eq!(record.kind(), "register_workflow");
}
