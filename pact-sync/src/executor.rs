// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The executor contract for the synchronized variant.
//!
//! Unlike the cooperative variant's `LocalExecutor` (`!Send`, good for one
//! thread), this one mirrors `futures::task::Spawn`: scheduled work and the
//! executor itself must be `Send + Sync`, since a synchronized future can be
//! resolved from, and waited on from, any thread.

use std::sync::Arc;

/// A unit of deferred work that may run on a different thread than the one
/// that scheduled it.
pub type Task = Box<dyn FnOnce() + Send>;

pub trait Executor: Send + Sync {
    /// Schedule `task` to run. A synchronous executor runs it inline, on
    /// whichever thread caused the future to become terminal.
    fn schedule(&self, task: Task);
}

/// Cheaply cloneable, thread-safe handle to an [`Executor`].
#[derive(Clone)]
pub struct ExecutorHandle(Arc<dyn Executor>);

impl ExecutorHandle {
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self(Arc::new(executor))
    }

    pub(crate) fn schedule(&self, task: Task) {
        self.0.schedule(task);
    }
}

impl std::fmt::Debug for ExecutorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExecutorHandle")
    }
}

/// Runs scheduled work inline, synchronously, on whichever thread triggers
/// the transition out of `Pending`. The process default until
/// [`crate::config::set_default_executor`] is called.
#[derive(Clone, Copy, Debug, Default)]
pub struct Synchronous;

impl Executor for Synchronous {
    fn schedule(&self, task: Task) {
        task();
    }
}
