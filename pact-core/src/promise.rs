// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! C2's write-handle: [`Promise<T>`], and the [`channel`] constructor that
//! pairs one with its [`Future`].
//!
//! The split mirrors `futures::channel::oneshot::{Sender, Receiver}`: a
//! promise is produced once by whoever computes the value, a future is
//! handed out to however many consumers want to observe it.

use pact_error::PactError;

use crate::config;
use crate::executor::LocalExecutorHandle;
use crate::future::Future;
use crate::state::SharedInner;

/// Write-handle to a future's eventual value.
pub struct Promise<T> {
    inner: SharedInner<T>,
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Create a linked `(Promise<T>, Future<T>)` pair, using the thread's
/// configured default executor for callback dispatch.
pub fn channel<T: 'static>() -> (Promise<T>, Future<T>) {
    channel_with_executor(config::default_executor())
}

/// Same as [`channel`], but pinning the pair's default callback executor
/// explicitly rather than inheriting the thread default.
pub fn channel_with_executor<T: 'static>(executor: LocalExecutorHandle) -> (Promise<T>, Future<T>) {
    let future = Future::new_with_executor(executor);
    let promise = Promise {
        inner: future.inner.clone(),
    };
    (promise, future)
}

impl<T: 'static> Promise<T> {
    /// A handle to this promise's future, for producers that also want to
    /// observe their own result (e.g. to check `cancelled()`).
    pub fn future(&self) -> Future<T> {
        Future::from_shared(self.inner.clone())
    }

    /// `true` once this promise's future is terminal.
    pub fn cancelled(&self) -> bool {
        self.future().cancelled()
    }

    /// Fulfil with `value`. Fails with [`PactError::InvalidState`] if
    /// already terminal (cancellation is absorbed as a no-op success).
    pub fn set_result(&self, value: T) -> pact_error::Result<()> {
        if self.try_set_result(value) {
            Ok(())
        } else {
            Err(PactError::invalid_state("result was already set"))
        }
    }

    /// Same as [`Promise::set_result`] but returns `false` instead of
    /// raising; cancellation-race is absorbed and returns `true`.
    pub fn try_set_result(&self, value: T) -> bool {
        Future::try_set_result_on(&self.inner, value)
    }

    /// Fail with `error`. Fails with [`PactError::InvalidState`] if
    /// already terminal (cancellation is absorbed as a no-op success).
    pub fn set_exception(&self, error: PactError) -> pact_error::Result<()> {
        if self.try_set_exception(error) {
            Ok(())
        } else {
            Err(PactError::invalid_state("result was already set"))
        }
    }

    /// Same as [`Promise::set_exception`] but returns `false` instead of
    /// raising; cancellation-race is absorbed and returns `true`.
    pub fn try_set_exception(&self, error: PactError) -> bool {
        Future::try_set_exception_on(&self.inner, error)
    }

    /// Cancel the future this promise backs. Returns `false` if already
    /// terminal.
    pub fn cancel(&self) -> bool {
        self.future().cancel()
    }

    /// Evaluate `f` and fulfil or fail from its outcome.
    pub fn complete<F>(&self, f: F)
    where
        F: FnOnce() -> pact_error::Result<T>,
    {
        match f() {
            Ok(value) => {
                let _ = self.try_set_result(value);
            }
            Err(error) => {
                let _ = self.try_set_exception(error);
            }
        }
    }
}
