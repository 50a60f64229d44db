// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! C6: a lazy, possibly-terminated sequence of values, each consumed
//! through a future.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use pact_error::PactError;
use pact_sync::{channel, ExecutorHandle, SyncFuture, SyncPromise};

use crate::guard::UnhandledErrorGuard;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserveCallbackId(u64);

fn next_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

enum State {
    Active,
    Cancelled,
    Ended(Option<PactError>),
}

type ObserveCallback<T> = Arc<dyn Fn(SyncFuture<T>) + Send + Sync>;

struct Inner<T> {
    state: State,
    pending_consumers: VecDeque<SyncPromise<T>>,
    observe_callbacks: Vec<(u64, ObserveCallback<T>, Option<ExecutorHandle>)>,
    guard: Option<UnhandledErrorGuard>,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self {
            state: State::Active,
            pending_consumers: VecDeque::new(),
            observe_callbacks: Vec::new(),
            guard: None,
        }
    }
}

/// A stream of values, each pulled through a [`SyncFuture`].
///
/// Cloning shares the same underlying stream (an `Arc`-backed handle) —
/// every clone sees the same sequence of values and the same termination.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::new())),
        }
    }

    /// A future for the next value. If the stream is already terminal, the
    /// returned future is already resolved with the termination reason.
    pub fn next(&self) -> SyncFuture<T> {
        let mut inner = self.inner.lock();
        match &inner.state {
            State::Active => {
                let (promise, future) = channel::<T>();
                inner.pending_consumers.push_back(promise);
                future
            }
            State::Cancelled => {
                let (promise, future) = channel::<T>();
                promise.cancel();
                future
            }
            State::Ended(stored) => {
                let error = stored.clone().unwrap_or(PactError::StreamEnded);
                if stored.is_some() {
                    if let Some(guard) = inner.guard.take() {
                        guard.defuse();
                    }
                }
                SyncFuture::failed(error)
            }
        }
    }

    /// Fulfil the head pending consumer (if any) with `v` and notify every
    /// observe-callback with a fresh, already-successful future. Fails with
    /// [`PactError::InvalidState`] if the stream already ended; absorbed as
    /// a no-op if the stream was cancelled.
    pub fn set_next_value(&self, value: T) -> pact_error::Result<()> {
        if self.try_set_next_value(value) {
            Ok(())
        } else {
            Err(PactError::invalid_state("stream has already ended"))
        }
    }

    /// Same as [`Observable::set_next_value`] but returns `false` instead
    /// of raising; a cancelled stream absorbs the value and returns `true`.
    pub fn try_set_next_value(&self, value: T) -> bool {
        let (head, observers) = {
            let mut inner = self.inner.lock();
            match inner.state {
                State::Cancelled => return true,
                State::Ended(_) => return false,
                State::Active => {
                    let head = inner.pending_consumers.pop_front();
                    let observers: Vec<_> = inner
                        .observe_callbacks
                        .iter()
                        .map(|(_, callback, executor)| (callback.clone(), executor.clone()))
                        .collect();
                    (head, observers)
                }
            }
        };

        if let Some(promise) = head {
            let _ = promise.try_set_result(value.clone());
        }

        for (callback, executor) in observers {
            let future = SyncFuture::successful(value.clone());
            let executor = executor.unwrap_or_else(pact_sync::default_executor);
            executor.schedule(Box::new(move || callback(future)));
        }
        true
    }

    /// Terminate the stream successfully. Any still-pending `next()`
    /// consumers resolve with [`PactError::StreamEnded`].
    pub fn set_end(&self) -> bool {
        self.terminate(State::Ended(None), |promise| {
            let _ = promise.try_set_exception(PactError::StreamEnded);
        })
    }

    /// Terminate the stream with `error`. Any still-pending `next()`
    /// consumers resolve with `error`; if none were pending and no
    /// observe-callback is registered, the stream's own unhandled-error
    /// guard arms.
    pub fn set_exception(&self, error: PactError) -> bool {
        let had_observers = {
            let inner = self.inner.lock();
            !inner.pending_consumers.is_empty() || !inner.observe_callbacks.is_empty()
        };
        let error_for_guard = error.clone();
        let transitioned = self.terminate(State::Ended(Some(error.clone())), move |promise| {
            let _ = promise.try_set_exception(error.clone());
        });
        if transitioned && !had_observers {
            let mut inner = self.inner.lock();
            inner.guard = Some(UnhandledErrorGuard::new(error_for_guard));
        }
        transitioned
    }

    /// Cancel the stream. Any still-pending `next()` consumers are
    /// cancelled too.
    pub fn cancel(&self) -> bool {
        self.terminate(State::Cancelled, |promise| {
            promise.cancel();
        })
    }

    /// Drains `pending_consumers` and resolves each via `resolve_pending`,
    /// then notifies every still-registered observe-callback with a fresh
    /// future carrying the same termination (§3 invariant 2 for streams).
    fn terminate<F>(&self, new_state: State, mut resolve_pending: F) -> bool
    where
        F: FnMut(&SyncPromise<T>),
    {
        let (pending, observers) = {
            let mut inner = self.inner.lock();
            if !matches!(inner.state, State::Active) {
                return false;
            }
            inner.state = new_state;
            let pending = std::mem::take(&mut inner.pending_consumers);
            let observers: Vec<_> = inner
                .observe_callbacks
                .iter()
                .map(|(_, callback, executor)| (callback.clone(), executor.clone()))
                .collect();
            (pending, observers)
        };
        for promise in &pending {
            resolve_pending(promise);
        }
        for (callback, executor) in observers {
            let (promise, future) = channel::<T>();
            resolve_pending(&promise);
            let executor = executor.unwrap_or_else(pact_sync::default_executor);
            executor.schedule(Box::new(move || callback(future)));
        }
        true
    }

    /// `true` once the stream has left `Active`.
    pub fn done(&self) -> bool {
        !matches!(self.inner.lock().state, State::Active)
    }

    pub fn cancelled(&self) -> bool {
        matches!(self.inner.lock().state, State::Cancelled)
    }

    /// Register `f` to be called with a fresh successful future on every
    /// subsequent value. Returns an id usable with
    /// [`Observable::remove_observe_callback`].
    pub fn add_observe_callback<F>(
        &self,
        f: F,
        executor: Option<ExecutorHandle>,
    ) -> ObserveCallbackId
    where
        F: Fn(SyncFuture<T>) + Send + Sync + 'static,
    {
        let id = next_id();
        self.inner
            .lock()
            .observe_callbacks
            .push((id, Arc::new(f), executor));
        ObserveCallbackId(id)
    }

    /// Remove a previously registered observe-callback. Returns how many
    /// were removed (0 or 1 — ids are unique, unlike the original's
    /// identity-based removal which could match multiple registrations of
    /// the same callable).
    pub fn remove_observe_callback(&self, id: ObserveCallbackId) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.observe_callbacks.len();
        inner.observe_callbacks.retain(|(cb_id, _, _)| *cb_id != id.0);
        before - inner.observe_callbacks.len()
    }
}

/// Blocks indefinitely for each value; `StreamEnded` translates to
/// iteration stopping (`None`), any other terminal reason (a stored
/// exception, or cancellation) surfaces as `Some(Err(_))` so callers can
/// distinguish a clean end from an abnormal one.
impl<T: Clone + Send + Sync + 'static> Iterator for Observable<T> {
    type Item = pact_error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let future = Observable::next(self);
        future.wait(None);
        match future.result(Some(Duration::from_secs(0))) {
            Ok(value) => Some(Ok(value)),
            Err(PactError::StreamEnded) => None,
            Err(other) => Some(Err(other)),
        }
    }
}
