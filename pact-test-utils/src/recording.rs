// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Inline executors (run like [`pact_core::Synchronous`]/
//! [`pact_sync::Synchronous`]) that additionally count how many times
//! they were asked to schedule something — useful for asserting that a
//! callback dispatched to its *named* executor rather than the future's
//! default (§4.2), without needing to inspect closure internals.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pact_core::{LocalExecutor, Task as LocalTask};
use pact_sync::{Executor, Task as SyncTask};

#[derive(Clone, Default)]
pub struct RecordingExecutor {
    invocations: Rc<Cell<usize>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.get()
    }
}

impl LocalExecutor for RecordingExecutor {
    fn schedule(&self, task: LocalTask) {
        self.invocations.set(self.invocations.get() + 1);
        task();
    }
}

#[derive(Clone, Default)]
pub struct RecordingSyncExecutor {
    invocations: Arc<AtomicUsize>,
}

impl RecordingSyncExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Executor for RecordingSyncExecutor {
    fn schedule(&self, task: SyncTask) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        task();
    }
}
