// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Deterministic executors and a synchronization latch for exercising
//! Pact's dispatch-ordering and cross-thread guarantees in tests, grounded
//! in the same executor contract `pact-exec` implements (§6).

mod latch;
mod manual;
mod recording;

pub use latch::CountdownLatch;
pub use manual::{ManualExecutor, ManualSyncExecutor};
pub use recording::{RecordingExecutor, RecordingSyncExecutor};
