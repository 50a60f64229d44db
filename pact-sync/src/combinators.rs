// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The same combinator algebra as `pact-core`'s, adapted for `Send` values
//! and `Arc`-backed sharing. See `pact_core::combinators` for the per-op
//! rationale; the semantics are identical, only the ownership model differs.

use pact_error::PactError;

use crate::executor::ExecutorHandle;
use crate::future::SyncFuture;
use crate::promise::{channel_with_executor, SyncPromise};

fn derive<T: Send + 'static, U: Send + 'static>(
    from: &SyncFuture<T>,
) -> (SyncPromise<U>, SyncFuture<U>) {
    channel_with_executor(from.default_executor())
}

fn backprop_cancel<T: Send + Clone + 'static>(upstream: SyncFuture<T>, downstream: &SyncFuture<T>) {
    let upstream_for_cancel = upstream;
    downstream.add_done_callback(
        move |fut| {
            if fut.cancelled() {
                upstream_for_cancel.cancel();
            }
        },
        None,
    );
}

impl<T: Send + Clone + 'static> SyncFuture<T> {
    /// Fulfil `g` with `fn(self.result())`; propagate failure or
    /// cancellation. Cancelling `g` cancels `self`.
    pub fn map<U, F>(&self, fun: F, executor: Option<ExecutorHandle>) -> SyncFuture<U>
    where
        U: Send + Clone + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let (promise, downstream) = derive::<T, U>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                } else {
                    match fut.exception(None) {
                        Ok(None) => {
                            let value = fut.result(None).expect("checked not an exception");
                            promise.complete(|| Ok(fun(value)));
                        }
                        Ok(Some(error)) | Err(error) => {
                            let _ = promise.try_set_exception(error);
                        }
                    }
                }
            },
            executor,
        );
        backprop_cancel(self.clone(), &downstream);
        downstream
    }

    /// Mirror `self` on success; on failure, fulfil `g` from
    /// `fun(exception)`. Cancellation of `self` propagates to `g`.
    pub fn recover<F>(&self, fun: F, executor: Option<ExecutorHandle>) -> SyncFuture<T>
    where
        F: FnOnce(PactError) -> T + Send + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                } else {
                    match fut.exception(None) {
                        Ok(None) => {
                            let value = fut.result(None).expect("checked not an exception");
                            let _ = promise.try_set_result(value);
                        }
                        Ok(Some(error)) | Err(error) => {
                            promise.complete(|| Ok(fun(error)));
                        }
                    }
                }
            },
            executor,
        );
        backprop_cancel(self.clone(), &downstream);
        downstream
    }

    /// On success, chain into whatever `next` produces; failures from
    /// `self` or the chained future become `g`'s failure. Cancellation is
    /// bidirectional between `self` and `g`.
    pub fn then<F>(&self, next: F, executor: Option<ExecutorHandle>) -> SyncFuture<T>
    where
        F: FnOnce() -> SyncFuture<T> + Send + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                    return;
                }
                match fut.exception(None) {
                    Ok(None) => {
                        let chained = next();
                        let promise_for_chain = promise.clone();
                        chained.add_done_callback(
                            move |chained_fut| {
                                let _ = promise_for_chain.future().try_set_from(&chained_fut);
                            },
                            None,
                        );
                    }
                    Ok(Some(error)) | Err(error) => {
                        let _ = promise.try_set_exception(error);
                    }
                }
            },
            executor,
        );
        backprop_cancel(self.clone(), &downstream);
        downstream
    }

    /// Mirror `self` on success; on failure, fall back to `alt()`.
    /// Cancelling `g` cancels whichever branch is currently active.
    pub fn fallback<F>(&self, alt: F, executor: Option<ExecutorHandle>) -> SyncFuture<T>
    where
        F: FnOnce() -> SyncFuture<T> + Send + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                    return;
                }
                match fut.exception(None) {
                    Ok(None) => {
                        let value = fut.result(None).expect("checked not an exception");
                        let _ = promise.try_set_result(value);
                    }
                    Ok(Some(_)) | Err(_) => {
                        let fallback_future = alt();
                        let promise_for_fallback = promise.clone();
                        fallback_future.add_done_callback(
                            move |fb| {
                                let _ = promise_for_fallback.future().try_set_from(&fb);
                            },
                            None,
                        );
                        let fallback_for_cancel = fallback_future;
                        promise.future().add_done_callback(
                            move |g| {
                                if g.cancelled() {
                                    fallback_for_cancel.cancel();
                                }
                            },
                            None,
                        );
                    }
                }
            },
            executor,
        );
        let upstream_for_cancel = self.clone();
        downstream.add_done_callback(
            move |g| {
                if g.cancelled() {
                    upstream_for_cancel.cancel();
                }
            },
            None,
        );
        downstream
    }

    /// An ordered list of outcomes aligned with `futures`.
    ///
    /// With `return_exceptions == false`, the first child failure
    /// immediately terminates `g`; a cancelled child raises
    /// [`PactError::Cancelled`] and does not, by itself, cancel `g`. With
    /// `return_exceptions == true`, every child's outcome — success or
    /// failure/cancellation — is collected into the result list instead,
    /// and `g` never fails on a child's account. Cancelling `g` cancels
    /// every still-pending child.
    pub fn gather(
        futures: Vec<SyncFuture<T>>,
        return_exceptions: bool,
        executor: Option<ExecutorHandle>,
    ) -> SyncFuture<Vec<pact_error::Result<T>>> {
        if futures.is_empty() {
            return SyncFuture::successful(Vec::new());
        }

        let (promise, downstream) = channel_with_executor::<Vec<pact_error::Result<T>>>(
            executor
                .clone()
                .unwrap_or_else(|| futures[0].default_executor()),
        );

        let total = futures.len();
        let results = std::sync::Arc::new(parking_lot::Mutex::new(
            (0..total)
                .map(|_| None)
                .collect::<Vec<Option<pact_error::Result<T>>>>(),
        ));
        let remaining = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(total));

        for (index, child) in futures.iter().cloned().enumerate() {
            let promise = promise.clone();
            let results = results.clone();
            let remaining = remaining.clone();
            child.add_done_callback(
                move |fut| {
                    let outcome = if fut.cancelled() {
                        Err(PactError::Cancelled)
                    } else {
                        fut.exception(None).and_then(|maybe_err| match maybe_err {
                            Some(err) => Err(err),
                            None => fut.result(None),
                        })
                    };
                    match outcome {
                        Err(error) if !return_exceptions => {
                            let _ = promise.try_set_exception(error);
                        }
                        outcome => {
                            results.lock()[index] = Some(outcome);
                            let left =
                                remaining.fetch_sub(1, std::sync::atomic::Ordering::AcqRel) - 1;
                            if left == 0 {
                                let collected: Vec<pact_error::Result<T>> = results
                                    .lock()
                                    .iter_mut()
                                    .map(|slot| slot.take().expect("all slots filled"))
                                    .collect();
                                let _ = promise.try_set_result(collected);
                            }
                        }
                    }
                },
                None,
            );
        }

        let children_for_cancel = futures;
        downstream.add_done_callback(
            move |g| {
                if g.cancelled() {
                    for child in &children_for_cancel {
                        child.cancel();
                    }
                }
            },
            None,
        );
        downstream
    }

    /// Adopt whichever child terminates first. Cancelling `g` cancels
    /// every child.
    pub fn first(futures: Vec<SyncFuture<T>>) -> pact_error::Result<SyncFuture<T>> {
        if futures.is_empty() {
            return Err(PactError::invalid_state("first() got an empty sequence"));
        }

        let (promise, downstream) = channel_with_executor::<T>(futures[0].default_executor());
        for child in &futures {
            let promise = promise.clone();
            child.add_done_callback(
                move |fut| {
                    let _ = promise.future().try_set_from(&fut);
                },
                None,
            );
        }

        let children_for_cancel = futures;
        downstream.add_done_callback(
            move |g| {
                if g.cancelled() {
                    for child in &children_for_cancel {
                        child.cancel();
                    }
                }
            },
            None,
        );
        Ok(downstream)
    }

    /// Adopt the first child to succeed; if every child fails or is
    /// cancelled, adopt the last terminal outcome. Cancelling `g` cancels
    /// every child.
    pub fn first_successful(futures: Vec<SyncFuture<T>>) -> pact_error::Result<SyncFuture<T>> {
        if futures.is_empty() {
            return Err(PactError::invalid_state(
                "first_successful() got an empty sequence",
            ));
        }

        let (promise, downstream) = channel_with_executor::<T>(futures[0].default_executor());
        let remaining = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(futures.len()));

        for child in &futures {
            let promise = promise.clone();
            let remaining = remaining.clone();
            child.add_done_callback(
                move |fut| {
                    let succeeded = !fut.cancelled() && matches!(fut.exception(None), Ok(None));
                    if succeeded {
                        let value = fut.result(None).expect("checked success");
                        let _ = promise.try_set_result(value);
                    } else {
                        let left = remaining.fetch_sub(1, std::sync::atomic::Ordering::AcqRel) - 1;
                        if left == 0 {
                            let _ = promise.future().try_set_from(&fut);
                        }
                    }
                },
                None,
            );
        }

        let children_for_cancel = futures;
        downstream.add_done_callback(
            move |g| {
                if g.cancelled() {
                    for child in &children_for_cancel {
                        child.cancel();
                    }
                }
            },
            None,
        );
        Ok(downstream)
    }

    /// `gather(futures, false).map(|results| fold(fun, init, results))`.
    pub fn reduce<U, F>(
        futures: Vec<SyncFuture<T>>,
        init: U,
        fun: F,
        map_executor: Option<ExecutorHandle>,
        gather_executor: Option<ExecutorHandle>,
    ) -> SyncFuture<U>
    where
        U: Send + Clone + 'static,
        F: Fn(U, T) -> U + Send + 'static,
    {
        SyncFuture::gather(futures, false, gather_executor).map(
            move |results| {
                results
                    .into_iter()
                    .map(|r| r.expect("gather(return_exceptions=false) guarantees every slot succeeded"))
                    .fold(init, &fun)
            },
            map_executor,
        )
    }
}
