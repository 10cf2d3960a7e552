// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the `Engine` trait and its backends.

use thiserror::Error;

/// Errors an `Engine` implementation can return.
///
/// Adapters never translate one kind into another: a sweeper-reclaimed
/// run-id is always `TimedOut`, never `UnknownActivity`/`UnknownDecision`,
/// so callers can tell ordinary expiration apart from genuine mis-routing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown process: {0}")]
    UnknownProcess(String),

    #[error("unknown activity run: {0}")]
    UnknownActivity(String),

    #[error("unknown decision run: {0}")]
    UnknownDecision(String),

    /// The run-id referenced by a `Complete*`/`Heartbeat*` call was reclaimed
    /// by the expiration sweeper between dispatch and completion.
    #[error("task timed out")]
    TimedOut,

    #[error("invalid decision: {0}")]
    InvalidDecision(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
