// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The synchronized variant's write-handle.

use pact_error::PactError;

use crate::config;
use crate::executor::ExecutorHandle;
use crate::future::SyncFuture;
use crate::state::SharedCore;

pub struct SyncPromise<T> {
    inner: SharedCore<T>,
}

impl<T> Clone for SyncPromise<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Create a linked `(SyncPromise<T>, SyncFuture<T>)` pair, using the
/// process's configured default executor for callback dispatch.
pub fn channel<T: Send + 'static>() -> (SyncPromise<T>, SyncFuture<T>) {
    channel_with_executor(config::default_executor())
}

/// Same as [`channel`], but pinning the pair's default callback executor
/// explicitly rather than inheriting the process default.
pub fn channel_with_executor<T: Send + 'static>(
    executor: ExecutorHandle,
) -> (SyncPromise<T>, SyncFuture<T>) {
    let future = SyncFuture::new_with_executor(executor);
    let promise = SyncPromise {
        inner: future.inner.clone(),
    };
    (promise, future)
}

impl<T: Send + 'static> SyncPromise<T> {
    /// A handle to this promise's future.
    pub fn future(&self) -> SyncFuture<T> {
        SyncFuture::from_shared(self.inner.clone())
    }

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

    pub fn try_set_result(&self, value: T) -> bool {
        SyncFuture::try_set_result_on(&self.inner, value)
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

    pub fn try_set_exception(&self, error: PactError) -> bool {
        SyncFuture::try_set_exception_on(&self.inner, error)
    }

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
