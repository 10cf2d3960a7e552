// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only journal file: one JSON object per line, guarded by an `fs2`
//! advisory exclusive lock so only one process can hold it open for writing
//! at a time.

use crate::wire::{Record, WireEvent};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub struct Wal {
    path: PathBuf,
    file: File,
    seq: u64,
}

impl Wal {
    /// Open (creating if needed) the journal at `path`, taking an exclusive
    /// advisory lock for the lifetime of this handle.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).read(true).open(&path)?;
        file.try_lock_exclusive().map_err(|_| {
            io::Error::new(io::ErrorKind::WouldBlock, format!("{} is locked by another process", path.display()))
        })?;
        let seq = count_lines(&path)?;
        Ok(Self { path, file, seq })
    }

    /// Number of records written (across this and prior sessions).
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Append one record, fsync-ing before returning so a crash afterward
    /// cannot lose it.
    pub fn append(&mut self, record: &Record, timestamp: u64) -> io::Result<u64> {
        let wire = WireEvent::encode(record, timestamp).map_err(to_io_error)?;
        let mut line = serde_json::to_vec(&wire).map_err(to_io_error)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.flush()?;
        self.file.sync_data()?;
        self.seq += 1;
        Ok(self.seq)
    }

    /// Replay every record currently on disk, in order.
    pub fn records(&self) -> io::Result<Vec<Record>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let wire: WireEvent = serde_json::from_str(&line).map_err(to_io_error)?;
            records.push(wire.decode().map_err(to_io_error)?);
        }
        Ok(records)
    }
}

fn to_io_error(err: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl Drop for Wal {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

fn count_lines(path: &Path) -> io::Result<u64> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut count = 0u64;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
