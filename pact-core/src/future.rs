// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! C2's read-handle: [`Future<T>`].

use pact_error::PactError;

use crate::config;
use crate::executor::LocalExecutorHandle;
use crate::state::{dispatch, run_callback, DoneCallback, Inner, Lifecycle, SharedInner};

/// Opaque handle returned by [`Future::add_done_callback`], passed back to
/// [`Future::remove_done_callback`].
///
/// Rust closures have no identity to compare by (unlike the callables the
/// original Python implementation keyed removal on), so callback removal
/// is keyed on this monotonically-issued id instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(pub(crate) u64);

/// Read-handle to a single eventual value or error.
///
/// Cloning a `Future` is cheap: clones share the same underlying state via
/// an `Rc`, matching the cooperative variant's "single logical thread, no
/// locks" scheduling model (§5).
pub struct Future<T> {
    pub(crate) inner: SharedInner<T>,
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Future<T> {
    pub(crate) fn from_shared(inner: SharedInner<T>) -> Self {
        Self { inner }
    }

    pub(crate) fn new_with_executor(executor: LocalExecutorHandle) -> Self {
        Self::from_shared(std::rc::Rc::new(std::cell::RefCell::new(Inner::new(executor))))
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

    /// The executor new futures derived from this one should default to.
    pub fn default_executor(&self) -> LocalExecutorHandle {
        self.inner.borrow().default_executor.clone()
    }

    /// `true` once the future has left `Pending` (success, failure, or
    /// cancellation).
    pub fn done(&self) -> bool {
        !matches!(self.inner.borrow().state, Lifecycle::Pending)
    }

    /// `true` only in the `Cancelled` state.
    pub fn cancelled(&self) -> bool {
        matches!(self.inner.borrow().state, Lifecycle::Cancelled)
    }

    /// The value, consuming the unhandled-error guard on any terminal read.
    ///
    /// Fails with [`PactError::Cancelled`] if cancelled, the stored
    /// exception if failed, or [`PactError::InvalidState`] if still
    /// pending.
    pub fn result(&self) -> pact_error::Result<T>
    where
        T: Clone,
    {
        let mut inner = self.inner.borrow_mut();
        match &inner.state {
            Lifecycle::Cancelled => Err(PactError::Cancelled),
            Lifecycle::Pending => Err(PactError::invalid_state("result is not ready")),
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

    /// `Ok(None)` on success, `Ok(Some(exception))` on failure.
    ///
    /// A cancelled future raises [`PactError::Cancelled`] here too (the
    /// resolution spec.md leaves open: some drafts return it as a value,
    /// this one raises — the original `FutureCore.exception()` raises).
    pub fn exception(&self) -> pact_error::Result<Option<PactError>> {
        let mut inner = self.inner.borrow_mut();
        match &inner.state {
            Lifecycle::Cancelled => Err(PactError::Cancelled),
            Lifecycle::Pending => Err(PactError::invalid_state("exception is not set")),
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

    /// Cancel this future. Returns `false` if it was already terminal.
    pub fn cancel(&self) -> bool {
        let shared = &self.inner;
        let transitioned = {
            let mut inner = shared.borrow_mut();
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

    pub(crate) fn try_set_result_on(shared: &SharedInner<T>, value: T) -> bool {
        let transitioned = {
            let mut inner = shared.borrow_mut();
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

    pub(crate) fn try_set_exception_on(shared: &SharedInner<T>, error: PactError) -> bool {
        let transitioned = {
            let mut inner = shared.borrow_mut();
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
    /// immediately — the fast path reentrant callbacks take too (§5).
    pub fn add_done_callback<F>(&self, f: F, executor: Option<LocalExecutorHandle>) -> CallbackId
    where
        F: FnOnce(Future<T>) + 'static,
    {
        let id = next_callback_id();
        let boxed: DoneCallback<T> = Box::new(f);
        let mut inner = self.inner.borrow_mut();
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
    /// still pending (and therefore removed); `false` if it had already
    /// fired or doesn't exist.
    pub fn remove_done_callback(&self, id: CallbackId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.callbacks.len();
        inner.callbacks.retain(|(tagged_id, _, _)| *tagged_id != id.0);
        inner.callbacks.len() != before
    }

    /// Copy a terminal `other`'s outcome into this future.
    pub fn set_from(&self, other: &Future<T>) -> pact_error::Result<()>
    where
        T: Clone,
    {
        if self.try_set_from(other) {
            Ok(())
        } else {
            Err(PactError::invalid_state("result was already set"))
        }
    }

    /// Same as [`Future::set_from`] but returns `false` instead of raising.
    pub fn try_set_from(&self, other: &Future<T>) -> bool
    where
        T: Clone,
    {
        if other.cancelled() {
            return self.cancel();
        }
        match other.exception() {
            Ok(Some(error)) => Self::try_set_exception_on(&self.inner, error),
            Ok(None) => {
                let value = other
                    .result()
                    .expect("other is done and not an exception");
                Self::try_set_result_on(&self.inner, value)
            }
            Err(_) => false,
        }
    }
}

fn next_callback_id() -> CallbackId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(0);
    CallbackId(NEXT.fetch_add(1, Ordering::Relaxed))
}
