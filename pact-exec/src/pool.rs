// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A pool executor (§6): `submit(fn) -> future`, backed by a tokio runtime's
//! blocking thread pool. Scheduling a plain callback (`Executor::schedule`,
//! used for callback dispatch) and submitting work that produces its own
//! result (`submit`) are both backed by `spawn_blocking`, since the work a
//! caller hands this executor is ordinary blocking code, not an async task.

use pact_sync::{channel_with_executor, Executor, ExecutorHandle, SyncFuture, Task};

/// Runs scheduled work on a tokio runtime's blocking-thread pool.
///
/// Cheaply cloneable: every clone shares the same underlying
/// [`tokio::runtime::Handle`].
#[derive(Clone)]
pub struct ThreadPoolExecutor {
    handle: tokio::runtime::Handle,
}

impl ThreadPoolExecutor {
    /// Use `handle` (e.g. `Handle::current()` from inside a running
    /// runtime, or a handle to one built with
    /// `tokio::runtime::Builder::new_multi_thread`) to run scheduled work.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Submit `f` to the pool; returns a future fulfilled with whatever
    /// `f` returns, per §6's "pool executor exposing
    /// `submit(fn, *args) -> future`".
    pub fn submit<T, F>(&self, f: F) -> SyncFuture<T>
    where
        T: Send + 'static,
        F: FnOnce() -> pact_error::Result<T> + Send + 'static,
    {
        let (promise, future) = channel_with_executor::<T>(ExecutorHandle::new(self.clone()));
        let handle = self.handle.clone();
        handle.spawn_blocking(move || promise.complete(f));
        future
    }
}

impl Executor for ThreadPoolExecutor {
    fn schedule(&self, task: Task) {
        let join = self.handle.spawn_blocking(task);
        // Dropping the `JoinHandle` detaches it; the task still runs to
        // completion on the pool. A panic inside `task` is reported by the
        // executor contract's own unhandled-error guard, not by us, so we
        // only log pool-level failures here (the task itself was never
        // observed to run).
        self.handle.spawn(async move {
            if let Err(err) = join.await {
                crate::warn!("scheduled task on pool executor failed to run: {err}");
            }
        });
    }
}
