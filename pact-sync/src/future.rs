// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The synchronized future: blockable `result`/`exception` with an optional
//! timeout, from any thread.

use std::time::Duration;

use pact_error::PactError;

use crate::config;
use crate::executor::ExecutorHandle;
use crate::state::{dispatch, new_core, run_callback, DoneCallback, Lifecycle, SharedCore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(pub(crate) u64);

/// Read-handle to a single eventual value or error, shareable across
/// threads (`Arc`-backed rather than `pact-core`'s `Rc`-backed handle).
pub struct SyncFuture<T> {
    pub(crate) inner: SharedCore<T>,
}

impl<T> Clone for SyncFuture<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + 'static> SyncFuture<T> {
    pub(crate) fn from_shared(inner: SharedCore<T>) -> Self {
        Self { inner }
    }

    pub(crate) fn new_with_executor(executor: ExecutorHandle) -> Self {
        Self::from_shared(new_core(executor))
    }

    /// A future already completed with `value`.
    pub fn successful(value: T) -> Self {
        let fut = Self::new_with_executor(config::default_executor());
        let _ = Self::try_set_result_on(&fut.inner, value);
        fut
    }

    /// A future already failed with `error`.
    pub fn failed(error: PactError) -> Self {
        let fut = Self::new_with_executor(config::default_executor());
        let _ = Self::try_set_exception_on(&fut.inner, error);
        fut
    }

    /// Evaluate `f` eagerly and complete with whichever outcome it returns.
    pub fn completed<F>(f: F) -> Self
    where
        F: FnOnce() -> pact_error::Result<T>,
    {
        match f() {
            Ok(value) => Self::successful(value),
            Err(error) => Self::failed(error),
        }
    }

    pub fn default_executor(&self) -> ExecutorHandle {
        self.inner.mutex.lock().default_executor.clone()
    }

    pub fn done(&self) -> bool {
        !matches!(self.inner.mutex.lock().state, Lifecycle::Pending)
    }

    pub fn cancelled(&self) -> bool {
        matches!(self.inner.mutex.lock().state, Lifecycle::Cancelled)
    }

    /// The value. With `timeout: None`, fails immediately with
    /// [`PactError::InvalidState`] if still pending rather than blocking
    /// forever (a deliberate deviation from the blocking-by-default
    /// original: this API never blocks unless the caller asks it to).
    /// With `timeout: Some(d)`, blocks up to `d` and fails with
    /// [`PactError::Timeout`] if still pending afterwards.
    pub fn result(&self, timeout: Option<Duration>) -> pact_error::Result<T>
    where
        T: Clone,
    {
        let mut inner = self.inner.mutex.lock();
        if matches!(inner.state, Lifecycle::Pending) {
            match timeout {
                None => {
                    return Err(PactError::invalid_state(
                        "result is not ready (pass a timeout to block)",
                    ))
                }
                Some(duration) => {
                    self.inner.condvar.wait_for(&mut inner, duration);
                }
            }
        }
        match &inner.state {
            Lifecycle::Pending => Err(PactError::timeout(
                "future did not complete within the given duration",
            )),
            Lifecycle::Cancelled => Err(PactError::Cancelled),
            Lifecycle::Finished(_) => {
                if let Some(guard) = inner.guard.take() {
                    guard.defuse();
                }
                match &inner.state {
                    Lifecycle::Finished(Ok(value)) => Ok(value.clone()),
                    Lifecycle::Finished(Err(error)) => Err(error.clone()),
                    _ => unreachable!(),
                }
            }
        }
    }

    /// `Ok(None)` on success, `Ok(Some(exception))` on failure. Same
    /// blocking/timeout contract as [`SyncFuture::result`]; a cancelled
    /// future raises [`PactError::Cancelled`] here too.
    pub fn exception(&self, timeout: Option<Duration>) -> pact_error::Result<Option<PactError>> {
        let mut inner = self.inner.mutex.lock();
        if matches!(inner.state, Lifecycle::Pending) {
            match timeout {
                None => {
                    return Err(PactError::invalid_state(
                        "exception is not set (pass a timeout to block)",
                    ))
                }
                Some(duration) => {
                    self.inner.condvar.wait_for(&mut inner, duration);
                }
            }
        }
        match &inner.state {
            Lifecycle::Pending => Err(PactError::timeout(
                "future did not complete within the given duration",
            )),
            Lifecycle::Cancelled => Err(PactError::Cancelled),
            Lifecycle::Finished(_) => {
                if let Some(guard) = inner.guard.take() {
                    guard.defuse();
                }
                match &inner.state {
                    Lifecycle::Finished(Ok(_)) => Ok(None),
                    Lifecycle::Finished(Err(error)) => Ok(Some(error.clone())),
                    _ => unreachable!(),
                }
            }
        }
    }

    /// Block (optionally with a timeout) until the future is terminal,
    /// without reading the value. Returns `false` if the timeout elapsed
    /// first.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        let mut inner = self.inner.mutex.lock();
        if matches!(inner.state, Lifecycle::Pending) {
            match timeout {
                None => self.inner.condvar.wait(&mut inner),
                Some(duration) => {
                    self.inner.condvar.wait_for(&mut inner, duration);
                }
            }
        }
        !matches!(inner.state, Lifecycle::Pending)
    }

    pub fn cancel(&self) -> bool {
        let shared = &self.inner;
        let transitioned = {
            let mut inner = shared.mutex.lock();
            if matches!(inner.state, Lifecycle::Pending) {
                inner.state = Lifecycle::Cancelled;
                true
            } else {
                false
            }
        };
        if transitioned {
            dispatch(shared);
        }
        transitioned
    }

    pub(crate) fn try_set_result_on(shared: &SharedCore<T>, value: T) -> bool {
        let transitioned = {
            let mut inner = shared.mutex.lock();
            match inner.state {
                Lifecycle::Cancelled => return true,
                Lifecycle::Pending => {
                    inner.state = Lifecycle::Finished(Ok(value));
                    true
                }
                Lifecycle::Finished(_) => false,
            }
        };
        if transitioned {
            dispatch(shared);
        }
        transitioned
    }

    pub(crate) fn try_set_exception_on(shared: &SharedCore<T>, error: PactError) -> bool {
        let transitioned = {
            let mut inner = shared.mutex.lock();
            match inner.state {
                Lifecycle::Cancelled => return true,
                Lifecycle::Pending => {
                    inner.state = Lifecycle::Finished(Err(error));
                    true
                }
                Lifecycle::Finished(_) => false,
            }
        };
        if transitioned {
            dispatch(shared);
        }
        transitioned
    }

    /// Register `f` to run once the future is terminal, on `executor` (or
    /// the future's default executor). If already terminal, schedules
    /// immediately.
    pub fn add_done_callback<F>(&self, f: F, executor: Option<ExecutorHandle>) -> CallbackId
    where
        F: FnOnce(SyncFuture<T>) + Send + 'static,
    {
        let id = next_callback_id();
        let boxed: DoneCallback<T> = Box::new(f);
        let mut inner = self.inner.mutex.lock();
        if matches!(inner.state, Lifecycle::Pending) {
            inner.callbacks.push((id.0, boxed, executor));
            id
        } else {
            let default_executor = inner.default_executor.clone();
            drop(inner);
            run_callback(&self.inner, boxed, executor, &default_executor);
            id
        }
    }

    /// Remove a previously registered callback. Returns `true` if it was
    /// still pending (and therefore removed).
    pub fn remove_done_callback(&self, id: CallbackId) -> bool {
        let mut inner = self.inner.mutex.lock();
        let before = inner.callbacks.len();
        inner.callbacks.retain(|(tagged_id, _, _)| *tagged_id != id.0);
        inner.callbacks.len() != before
    }

    /// Copy a terminal `other`'s outcome into this future.
    pub fn set_from(&self, other: &SyncFuture<T>) -> pact_error::Result<()>
    where
        T: Clone,
    {
        if self.try_set_from(other) {
            Ok(())
        } else {
            Err(PactError::invalid_state("result was already set"))
        }
    }

    /// Same as [`SyncFuture::set_from`] but returns `false` instead of
    /// raising. `other` must already be terminal; this never blocks.
    pub fn try_set_from(&self, other: &SyncFuture<T>) -> bool
    where
        T: Clone,
    {
        let outcome = {
            let mut inner = other.inner.mutex.lock();
            let outcome = match &inner.state {
                Lifecycle::Pending => None,
                Lifecycle::Cancelled => Some(None),
                Lifecycle::Finished(Ok(value)) => Some(Some(Ok(value.clone()))),
                Lifecycle::Finished(Err(error)) => Some(Some(Err(error.clone()))),
            };
            if outcome.is_some() {
                if let Some(guard) = inner.guard.take() {
                    guard.defuse();
                }
            }
            outcome
        };
        match outcome {
            None => false,
            Some(None) => self.cancel(),
            Some(Some(Ok(value))) => Self::try_set_result_on(&self.inner, value),
            Some(Some(Err(error))) => Self::try_set_exception_on(&self.inner, error),
        }
    }
}

fn next_callback_id() -> CallbackId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(0);
    CallbackId(NEXT.fetch_add(1, Ordering::Relaxed))
}
