// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Unhandled-error guard, identical contract to `pact-core`'s but reporting
//! through the synchronized variant's process-wide sink rather than a
//! thread-local one (a synchronized future can be dropped on any thread).

use pact_error::PactError;

pub struct UnhandledErrorGuard {
    error: PactError,
}

impl UnhandledErrorGuard {
    pub(crate) fn new(error: PactError) -> Self {
        Self { error }
    }

    pub(crate) fn defuse(self) {
        std::mem::forget(self);
    }
}

impl Drop for UnhandledErrorGuard {
    fn drop(&mut self) {
        crate::config::report_unhandled(&self.error);
    }
}
