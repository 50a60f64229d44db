// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Unhandled-error guard: at-most-once reporting of a failure nobody
//! observed, per §4.2 and the Lifecycle section of the data model.

use pact_error::PactError;

/// Armed whenever a future finishes with an exception. Dropped silently
/// (via [`UnhandledErrorGuard::defuse`]) once a consumer reads the
/// failure through `result()`/`exception()`; otherwise its `Drop` impl
/// reports the exception exactly once.
pub struct UnhandledErrorGuard {
    error: PactError,
}

impl UnhandledErrorGuard {
    pub(crate) fn new(error: PactError) -> Self {
        Self { error }
    }

    /// Mark this guard as handled — it will not report on drop.
    pub(crate) fn defuse(self) {
        std::mem::forget(self);
    }
}

impl Drop for UnhandledErrorGuard {
    fn drop(&mut self) {
        crate::config::report_unhandled(&self.error);
    }
}
