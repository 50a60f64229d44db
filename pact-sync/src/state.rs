// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared innards: the same three-state lifecycle as `pact-core`, guarded
//! by a `parking_lot::Mutex` and signalled through a `Condvar` so blocking
//! waiters on other threads wake up on every transition.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use pact_error::PactError;

use crate::executor::ExecutorHandle;
use crate::future::SyncFuture;
use crate::guard::UnhandledErrorGuard;

pub(crate) enum Lifecycle<T> {
    Pending,
    Finished(Result<T, PactError>),
    Cancelled,
}

pub(crate) type DoneCallback<T> = Box<dyn FnOnce(SyncFuture<T>) + Send>;

pub(crate) struct Inner<T> {
    pub(crate) state: Lifecycle<T>,
    pub(crate) callbacks: Vec<(u64, DoneCallback<T>, Option<ExecutorHandle>)>,
    pub(crate) default_executor: ExecutorHandle,
    pub(crate) guard: Option<UnhandledErrorGuard>,
}

impl<T> Inner<T> {
    pub(crate) fn new(default_executor: ExecutorHandle) -> Self {
        Self {
            state: Lifecycle::Pending,
            callbacks: Vec::new(),
            default_executor,
            guard: None,
        }
    }
}

pub(crate) struct Core<T> {
    pub(crate) mutex: Mutex<Inner<T>>,
    pub(crate) condvar: Condvar,
}

pub(crate) type SharedCore<T> = Arc<Core<T>>;

pub(crate) fn new_core<T>(default_executor: ExecutorHandle) -> SharedCore<T> {
    Arc::new(Core {
        mutex: Mutex::new(Inner::new(default_executor)),
        condvar: Condvar::new(),
    })
}

/// Runs after any transition out of `Pending`, under no lock. Arms the
/// unhandled-error guard for a failure, wakes every blocked waiter, then
/// drains a snapshot of the callback list so reentrant registrations from
/// within a callback aren't delivered twice.
pub(crate) fn dispatch<T: Send + 'static>(shared: &SharedCore<T>) {
    let (callbacks, default_executor) = {
        let mut inner = shared.mutex.lock();
        if let Lifecycle::Finished(Err(err)) = &inner.state {
            inner.guard = Some(UnhandledErrorGuard::new(err.clone()));
        }
        let callbacks = std::mem::take(&mut inner.callbacks);
        (callbacks, inner.default_executor.clone())
    };
    shared.condvar.notify_all();

    for (_id, callback, executor) in callbacks {
        run_callback(shared, callback, executor, &default_executor);
    }
}

pub(crate) fn run_callback<T: Send + 'static>(
    shared: &SharedCore<T>,
    callback: DoneCallback<T>,
    executor: Option<ExecutorHandle>,
    default_executor: &ExecutorHandle,
) {
    let future = SyncFuture::from_shared(shared.clone());
    let executor = executor.unwrap_or_else(|| default_executor.clone());
    executor.schedule(Box::new(move || callback(future)));
}
