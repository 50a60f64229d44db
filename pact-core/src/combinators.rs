// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! C4: the combinator algebra. Every combinator here installs a
//! back-propagating cancellation callback on the new future so that
//! cancelling the derived future cancels its inputs, per §4.3.

use pact_error::PactError;

use crate::executor::LocalExecutorHandle;
use crate::future::Future;
use crate::promise::{channel_with_executor, Promise};

/// Reject futures bound to different event loops (§4.4/§4.5). Futures
/// whose default executor isn't loop-bound (`loop_id() == None`) are
/// always compatible with anything.
pub fn compatible<T: 'static>(futures: &[Future<T>]) -> pact_error::Result<()> {
    let mut seen: Option<u64> = None;
    for f in futures {
        if let Some(id) = f.default_executor().loop_id() {
            match seen {
                None => seen = Some(id),
                Some(existing) if existing != id => {
                    return Err(PactError::incompatible(
                        "futures are bound to different event loops",
                    ))
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn derive<T: 'static, U: 'static>(from: &Future<T>) -> (Promise<U>, Future<U>) {
    channel_with_executor(from.default_executor())
}

fn backprop_cancel<T: 'static>(upstream: Future<T>, downstream: &Future<T>)
where
    T: Clone,
{
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

impl<T: Clone + 'static> Future<T> {
    /// Fulfil `g` with `fn(self.result())`; propagate failure or
    /// cancellation; an exception raised by `fn` becomes `g`'s failure.
    /// Cancelling `g` cancels `self`.
    pub fn map<U, F>(&self, fun: F, executor: Option<LocalExecutorHandle>) -> Future<U>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> U + 'static,
    {
        let (promise, downstream) = derive::<T, U>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                } else {
                    match fut.exception() {
                        Ok(None) => {
                            let value = fut.result().expect("checked not an exception");
                            promise.complete(|| Ok(fun(value)));
                        }
                        Ok(Some(error)) => {
                            let _ = promise.try_set_exception(error);
                        }
                        Err(error) => {
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

    /// Mirror `self` on success; on failure, fulfil `g` from `fun(exception)`.
    /// Cancellation of `self` propagates to `g` (never silently recovered).
    pub fn recover<F>(&self, fun: F, executor: Option<LocalExecutorHandle>) -> Future<T>
    where
        F: FnOnce(PactError) -> T + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                } else {
                    match fut.exception() {
                        Ok(None) => {
                            let value = fut.result().expect("checked not an exception");
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
    /// `self`, `next`, or the chained future all become `g`'s failure.
    /// Cancellation is bidirectional between `self` and `g`.
    pub fn then<F>(&self, next: F, executor: Option<LocalExecutorHandle>) -> Future<T>
    where
        F: FnOnce() -> Future<T> + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        let upstream_for_chain = self.clone();
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                    return;
                }
                match fut.exception() {
                    Ok(None) => {
                        let chained = next();
                        if let Err(error) = compatible(&[upstream_for_chain.clone(), chained.clone()])
                        {
                            let _ = promise.try_set_exception(error);
                            return;
                        }
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
    /// Cancelling `g` cancels `self` while it's pending; once the
    /// fallback has started, cancelling `g` cancels the fallback instead.
    pub fn fallback<F>(&self, alt: F, executor: Option<LocalExecutorHandle>) -> Future<T>
    where
        F: FnOnce() -> Future<T> + 'static,
    {
        let (promise, downstream) = derive::<T, T>(self);
        let upstream_for_compat = self.clone();
        self.add_done_callback(
            move |fut| {
                if fut.cancelled() {
                    promise.cancel();
                    return;
                }
                match fut.exception() {
                    Ok(None) => {
                        let value = fut.result().expect("checked not an exception");
                        let _ = promise.try_set_result(value);
                    }
                    Ok(Some(_)) | Err(_) => {
                        let fallback_future = alt();
                        if let Err(error) =
                            compatible(&[upstream_for_compat.clone(), fallback_future.clone()])
                        {
                            let _ = promise.try_set_exception(error);
                            return;
                        }
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
        // Cancelling `g` before `self` resolves cancels `self`; once the
        // fallback has started, its own done-callback above cancels that
        // instead (the fallback's promise.future() hook fires first since
        // it was registered earlier in program order within the same
        // dispatch).
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
    /// immediately terminates `g` with that exception — a cancelled child
    /// is treated as raising [`PactError::Cancelled`] and does not, by
    /// itself, cancel `g`. With `return_exceptions == true`, `g` never
    /// fails on a child's account: every child's outcome, success or
    /// failure/cancellation alike, is instead collected into the result
    /// list. Cancelling `g` cancels every still-pending child. Futures
    /// bound to different event loops are rejected via [`compatible`] at
    /// call time.
    pub fn gather(
        futures: Vec<Future<T>>,
        return_exceptions: bool,
        executor: Option<LocalExecutorHandle>,
    ) -> pact_error::Result<Future<Vec<pact_error::Result<T>>>> {
        if futures.is_empty() {
            return Ok(Future::successful(Vec::new()));
        }
        compatible(&futures)?;

        let (promise, downstream) = channel_with_executor::<Vec<pact_error::Result<T>>>(
            executor
                .clone()
                .unwrap_or_else(|| futures[0].default_executor()),
        );

        let total = futures.len();
        let results: std::rc::Rc<std::cell::RefCell<Vec<Option<pact_error::Result<T>>>>> =
            std::rc::Rc::new(std::cell::RefCell::new((0..total).map(|_| None).collect()));
        let remaining = std::rc::Rc::new(std::cell::Cell::new(total));

        for (index, child) in futures.iter().cloned().enumerate() {
            let promise = promise.clone();
            let results = results.clone();
            let remaining = remaining.clone();
            child.add_done_callback(
                move |fut| {
                    let outcome = if fut.cancelled() {
                        Err(PactError::Cancelled)
                    } else {
                        fut.exception().and_then(|maybe_err| match maybe_err {
                            Some(err) => Err(err),
                            None => fut.result(),
                        })
                    };
                    match outcome {
                        Err(error) if !return_exceptions => {
                            let _ = promise.try_set_exception(error);
                        }
                        outcome => {
                            results.borrow_mut()[index] = Some(outcome);
                            let left = remaining.get() - 1;
                            remaining.set(left);
                            if left == 0 {
                                let collected: Vec<pact_error::Result<T>> = results
                                    .borrow_mut()
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
        Ok(downstream)
    }

    /// Adopt whichever child terminates first, success, failure, or
    /// cancellation alike. Cancelling `g` cancels every child.
    pub fn first(futures: Vec<Future<T>>) -> pact_error::Result<Future<T>> {
        if futures.is_empty() {
            return Err(PactError::invalid_state("first() got an empty sequence"));
        }
        compatible(&futures)?;

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
    pub fn first_successful(futures: Vec<Future<T>>) -> pact_error::Result<Future<T>> {
        if futures.is_empty() {
            return Err(PactError::invalid_state(
                "first_successful() got an empty sequence",
            ));
        }
        compatible(&futures)?;

        let (promise, downstream) = channel_with_executor::<T>(futures[0].default_executor());
        let remaining = std::rc::Rc::new(std::cell::Cell::new(futures.len()));

        for child in &futures {
            let promise = promise.clone();
            let remaining = remaining.clone();
            child.add_done_callback(
                move |fut| {
                    let succeeded = !fut.cancelled()
                        && matches!(fut.exception(), Ok(None));
                    if succeeded {
                        let value = fut.result().expect("checked success");
                        let _ = promise.try_set_result(value);
                    } else {
                        let left = remaining.get() - 1;
                        remaining.set(left);
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
        futures: Vec<Future<T>>,
        init: U,
        fun: F,
        map_executor: Option<LocalExecutorHandle>,
        gather_executor: Option<LocalExecutorHandle>,
    ) -> pact_error::Result<Future<U>>
    where
        U: Clone + 'static,
        F: Fn(U, T) -> U + 'static,
    {
        let gathered = Future::gather(futures, false, gather_executor)?;
        Ok(gathered.map(
            move |results| {
                results
                    .into_iter()
                    .map(|r| r.expect("gather(return_exceptions=false) guarantees every slot succeeded"))
                    .fold(init, &fun)
            },
            map_executor,
        ))
    }
}
