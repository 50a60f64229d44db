// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Process-wide configuration: the default executor and the unhandled-error
//! sink. Thread-local storage (as `pact-core` uses) doesn't fit here — a
//! synchronized future can be created on one thread and dropped on another —
//! so this is a pair of `RwLock`-guarded globals instead.

use std::sync::{OnceLock, RwLock};

use pact_error::PactError;

use crate::executor::{Executor, ExecutorHandle, Synchronous};

fn default_executor_slot() -> &'static RwLock<ExecutorHandle> {
    static SLOT: OnceLock<RwLock<ExecutorHandle>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(ExecutorHandle::new(Synchronous)))
}

fn unhandled_sink_slot() -> &'static RwLock<Box<dyn Fn(&PactError) + Send + Sync>> {
    static SLOT: OnceLock<RwLock<Box<dyn Fn(&PactError) + Send + Sync>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(Box::new(log_unhandled)))
}

fn log_unhandled(err: &PactError) {
    crate::warn!("synchronized future exception was never retrieved: {err}");
}

/// The default executor new synchronized futures pick up when the caller
/// doesn't name one of their own.
pub fn default_executor() -> ExecutorHandle {
    default_executor_slot().read().unwrap().clone()
}

/// Override the process-wide default executor for synchronized futures.
pub fn set_default_executor(executor: impl Executor + 'static) {
    *default_executor_slot().write().unwrap() = ExecutorHandle::new(executor);
}

/// Override the sink invoked when a synchronized future's unhandled-error
/// guard fires.
pub fn set_unhandled_error_sink(sink: impl Fn(&PactError) + Send + Sync + 'static) {
    *unhandled_sink_slot().write().unwrap() = Box::new(sink);
}

pub(crate) fn report_unhandled(err: &PactError) {
    (unhandled_sink_slot().read().unwrap())(err);
}
