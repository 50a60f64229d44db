// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A countdown latch for blocking a test thread until a cross-thread
//! callback (e.g. one dispatched by [`crate::ManualSyncExecutor`] on a
//! worker thread, or a `pact-sync` guard/callback firing from whichever
//! thread completed the future) has run — the same mutex/condvar pattern
//! `pact-sync` uses for `wait(timeout)`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

struct Inner {
    remaining: Mutex<usize>,
    condvar: Condvar,
}

/// Cheaply cloneable; every clone counts down the same shared total.
#[derive(Clone)]
pub struct CountdownLatch {
    inner: Arc<Inner>,
}

impl CountdownLatch {
    pub fn new(count: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                remaining: Mutex::new(count),
                condvar: Condvar::new(),
            }),
        }
    }

    /// Decrement the count, waking any waiter once it reaches zero.
    pub fn count_down(&self) {
        let mut remaining = self.inner.remaining.lock();
        if *remaining > 0 {
            *remaining -= 1;
            if *remaining == 0 {
                self.inner.condvar.notify_all();
            }
        }
    }

    /// Block until the count reaches zero or `timeout` elapses. Returns
    /// whether it reached zero.
    pub fn wait(&self, timeout: Duration) -> bool {
        let mut remaining = self.inner.remaining.lock();
        if *remaining == 0 {
            return true;
        }
        self.inner.condvar.wait_for(&mut remaining, timeout);
        *remaining == 0
    }
}
