// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Process-wide (thread-local, since the cooperative variant is
//! thread-confined) configuration: the default executor and the
//! unhandled-error sink, per §6's external interfaces.

use std::cell::RefCell;

use pact_error::PactError;

use crate::executor::{LocalExecutor, LocalExecutorHandle, Synchronous};

thread_local! {
    static DEFAULT_EXECUTOR: RefCell<LocalExecutorHandle> =
        RefCell::new(LocalExecutorHandle::new(Synchronous));
    static UNHANDLED_SINK: RefCell<Box<dyn Fn(&PactError)>> =
        RefCell::new(Box::new(log_unhandled));
}

fn log_unhandled(err: &PactError) {
    crate::warn!("future exception was never retrieved: {err}");
}

/// The default executor new futures on this thread pick up when the
/// caller doesn't name one of their own.
pub fn default_executor() -> LocalExecutorHandle {
    DEFAULT_EXECUTOR.with(|e| e.borrow().clone())
}

/// Override the thread's default executor. Must be called before the
/// first future is created on this thread to take effect for it; per
/// §6 the default is otherwise lazily the synchronous executor.
pub fn set_default_executor(executor: impl LocalExecutor + 'static) {
    DEFAULT_EXECUTOR.with(|e| *e.borrow_mut() = LocalExecutorHandle::new(executor));
}

/// Override the sink invoked when the unhandled-error guard fires.
pub fn set_unhandled_error_sink(sink: impl Fn(&PactError) + 'static) {
    UNHANDLED_SINK.with(|s| *s.borrow_mut() = Box::new(sink));
}

pub(crate) fn report_unhandled(err: &PactError) {
    UNHANDLED_SINK.with(|s| (s.borrow())(err));
}
