// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! C2 (future state) + C3 (callback registry/dispatch) shared innards.

use std::cell::RefCell;
use std::rc::Rc;

use pact_error::PactError;

use crate::executor::LocalExecutorHandle;
use crate::future::Future;
use crate::guard::UnhandledErrorGuard;

/// The three-state machine of §3's data model: `Cancelled` is kept as a
/// distinct variant rather than folded into `Finished(failure(..))`, so
/// `cancelled()` stays an O(1) read of the discriminant alone.
pub(crate) enum Lifecycle<T> {
    Pending,
    Finished(Result<T, PactError>),
    Cancelled,
}

pub(crate) type DoneCallback<T> = Box<dyn FnOnce(Future<T>)>;

pub(crate) struct Inner<T> {
    pub(crate) state: Lifecycle<T>,
    pub(crate) callbacks: Vec<(u64, DoneCallback<T>, Option<LocalExecutorHandle>)>,
    pub(crate) default_executor: LocalExecutorHandle,
    pub(crate) guard: Option<UnhandledErrorGuard>,
}

impl<T> Inner<T> {
    pub(crate) fn new(default_executor: LocalExecutorHandle) -> Self {
        Self {
            state: Lifecycle::Pending,
            callbacks: Vec::new(),
            default_executor,
            guard: None,
        }
    }
}

pub(crate) type SharedInner<T> = Rc<RefCell<Inner<T>>>;

/// Runs after any transition out of `Pending`. Arms the unhandled-error
/// guard for a failure, then drains a snapshot of the callback list so
/// callbacks that reentrantly call `add_done_callback` on the
/// now-terminal future don't get delivered twice or deadlock.
pub(crate) fn dispatch<T: 'static>(shared: &SharedInner<T>) {
    let (callbacks, default_executor) = {
        let mut inner = shared.borrow_mut();
        if let Lifecycle::Finished(Err(err)) = &inner.state {
            inner.guard = Some(UnhandledErrorGuard::new(err.clone()));
        }
        let callbacks = std::mem::take(&mut inner.callbacks);
        (callbacks, inner.default_executor.clone())
    };

    for (_id, callback, executor) in callbacks {
        run_callback(shared, callback, executor, &default_executor);
    }
}

pub(crate) fn run_callback<T: 'static>(
    shared: &SharedInner<T>,
    callback: DoneCallback<T>,
    executor: Option<LocalExecutorHandle>,
    default_executor: &LocalExecutorHandle,
) {
    let future = Future::from_shared(shared.clone());
    let executor = executor.unwrap_or_else(|| default_executor.clone());
    executor.schedule(Box::new(move || callback(future)));
}
