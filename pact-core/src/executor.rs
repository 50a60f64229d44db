// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The executor contract for the cooperative variant.
//!
//! A cooperative future never crosses a thread boundary, so its executor
//! mirrors `futures::task::LocalSpawn` rather than `Spawn`: scheduled work
//! is not required to be `Send`.

use std::rc::Rc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Fire-and-forget scheduling, per §6's executor contract: takes ownership
/// of running `task` exactly once, with no return value required.
pub trait LocalExecutor {
    /// Schedule `task` to run. A synchronous executor runs it inline.
    fn schedule(&self, task: Task);

    /// Identity of the event loop this executor is bound to, if any.
    ///
    /// `None` for ordinary executors. An event-loop-bound executor
    /// returns a stable id so combinators can reject futures bound to
    /// different loops (§4.4's `compatible` check).
    fn loop_id(&self) -> Option<u64> {
        None
    }
}

/// Cheaply cloneable handle to a [`LocalExecutor`].
#[derive(Clone)]
pub struct LocalExecutorHandle(Rc<dyn LocalExecutor>);

impl LocalExecutorHandle {
    /// Wrap any executor as a shareable handle.
    pub fn new(executor: impl LocalExecutor + 'static) -> Self {
        Self(Rc::new(executor))
    }

    pub(crate) fn schedule(&self, task: Task) {
        self.0.schedule(task);
    }

    pub(crate) fn loop_id(&self) -> Option<u64> {
        self.0.loop_id()
    }
}

impl std::fmt::Debug for LocalExecutorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LocalExecutorHandle")
    }
}

/// Runs scheduled work inline, synchronously, at submission time.
///
/// This is the process default until [`crate::config::set_default_executor`]
/// is called, matching §6: "lazily initialised to the synchronous executor".
#[derive(Clone, Copy, Debug, Default)]
pub struct Synchronous;

impl LocalExecutor for Synchronous {
    fn schedule(&self, task: Task) {
        task();
    }
}
