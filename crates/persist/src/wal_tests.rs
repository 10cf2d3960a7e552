// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;
use wfe_core::ProcessId;

fn test_record() -> Record {
    Record::Signal { process_id: ProcessId::new(), name: "wake".to_string(), data: None }
}

#[test]
fn open_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    let wal = Wal::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(wal.seq(), 0);
}

#[test]
fn append_increments_seq_and_is_replayable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    let mut wal = Wal::open(&path).unwrap();

    let seq1 = wal.append(&test_record(), 1).unwrap();
    let seq2 = wal.append(&test_record(), 2).unwrap();
    assert_eq!(seq1, 1);
    assert_eq!(seq2, 2);

    let records = wal.records().unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn reopening_resumes_from_the_persisted_seq() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    {
        let mut wal = Wal::open(&path).unwrap();
        wal.append(&test_record(), 1).unwrap();
    }

    let wal = Wal::open(&path).unwrap();
    assert_eq!(wal.seq(), 1);
}

#[test]
fn a_second_handle_cannot_lock_the_same_journal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    let _first = Wal::open(&path).unwrap();
    assert!(Wal::open(&path).is_err());
}
