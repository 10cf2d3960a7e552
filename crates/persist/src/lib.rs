// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-persist: the durable, file-backed `Engine` backend.
//!
//! Every mutation is appended to a JSON Lines journal (fsynced, `fs2`-locked
//! for single-writer durability) before updating the in-memory projection
//! that `PersistentEngine` serves reads from. On restart the journal is
//! replayed through the same `apply` logic to rebuild that projection.

pub mod engine;
pub mod state;
pub mod wal;
pub mod wire;

pub use engine::PersistentEngine;
pub use state::PersistentState;
pub use wal::Wal;
pub use wire::{Record, WireEvent};
