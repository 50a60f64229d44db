// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A stream-level unhandled-exception guard, independent of the per-future
//! guards `pact-sync` futures carry. Armed only when a stream terminates
//! with an exception while nothing is positioned to observe it (no pending
//! `next()` consumer, no observe-callback registered) — per §4.6's
//! unhandled-exception guard note.

use pact_error::PactError;

pub(crate) struct UnhandledErrorGuard {
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
        crate::warn!("stream exception was never retrieved: {}", self.error);
    }
}
