// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pact_core::{channel, Future};
use pact_error::PactError;

#[test]
fn pending_future_reports_not_done() {
    let (_promise, future) = channel::<i32>();
    assert!(!future.done());
    assert!(!future.cancelled());
}

#[test]
fn successful_completes_immediately() {
    let future = Future::successful(42);
    assert!(future.done());
    assert_eq!(future.result().unwrap(), 42);
}

#[test]
fn failed_completes_immediately() {
    let future = Future::<i32>::failed(PactError::invalid_state("boom"));
    assert!(future.done());
    assert!(matches!(future.result(), Err(PactError::InvalidState { .. })));
}

#[test]
fn completed_runs_closure_eagerly() {
    let future = Future::completed(|| Ok::<_, PactError>(7));
    assert_eq!(future.result().unwrap(), 7);

    let failed = Future::completed(|| Err::<i32, _>(PactError::timeout("slow")));
    assert!(matches!(failed.result(), Err(PactError::Timeout { .. })));
}

#[test]
fn promise_set_result_resolves_future() {
    let (promise, future) = channel::<i32>();
    promise.set_result(10).unwrap();
    assert!(future.done());
    assert_eq!(future.result().unwrap(), 10);
}

#[test]
fn promise_set_result_twice_fails() {
    let (promise, _future) = channel::<i32>();
    promise.set_result(1).unwrap();
    assert!(promise.set_result(2).is_err());
}

#[test]
fn try_set_result_after_cancel_absorbs_as_success() {
    let (promise, future) = channel::<i32>();
    future.cancel();
    assert!(promise.try_set_result(5));
    assert!(future.cancelled());
}

#[test]
fn result_on_pending_future_is_invalid_state() {
    let (_promise, future) = channel::<i32>();
    assert!(matches!(future.result(), Err(PactError::InvalidState { .. })));
}

#[test]
fn result_on_cancelled_future_raises_cancelled() {
    let (_promise, future) = channel::<i32>();
    future.cancel();
    assert!(matches!(future.result(), Err(PactError::Cancelled)));
}

#[test]
fn exception_on_cancelled_future_raises_cancelled_not_a_value() {
    let (_promise, future) = channel::<i32>();
    future.cancel();
    assert!(matches!(future.exception(), Err(PactError::Cancelled)));
}

#[test]
fn exception_on_success_is_none() {
    let future = Future::successful(1);
    assert!(future.exception().unwrap().is_none());
}

#[test]
fn exception_on_failure_is_some() {
    let future = Future::<i32>::failed(PactError::timeout("t"));
    assert!(matches!(future.exception(), Ok(Some(PactError::Timeout { .. }))));
}

#[test]
fn cancel_is_a_noop_once_terminal() {
    let (promise, future) = channel::<i32>();
    promise.set_result(1).unwrap();
    assert!(!future.cancel());
    assert!(!future.cancelled());
}

#[test]
fn set_from_copies_terminal_outcome() {
    let source = Future::successful(9);
    let (promise, target) = channel::<i32>();
    target.set_from(&source).unwrap();
    assert_eq!(target.result().unwrap(), 9);
    drop(promise);
}

#[test]
fn set_from_cancelled_source_cancels_target() {
    let (_source_promise, source) = channel::<i32>();
    source.cancel();
    let (_target_promise, target) = channel::<i32>();
    target.set_from(&source).unwrap();
    assert!(target.cancelled());
}
