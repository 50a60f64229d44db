// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pact_error::PactError;
use pact_stream::Observable;

#[test]
fn next_resolves_in_push_order() {
    let stream = Observable::<i32>::new();
    let first = stream.next();
    let second = stream.next();

    stream.set_next_value(1).unwrap();
    stream.set_next_value(2).unwrap();

    assert_eq!(first.result(Some(Duration::from_secs(1))).unwrap(), 1);
    assert_eq!(second.result(Some(Duration::from_secs(1))).unwrap(), 2);
}

#[test]
fn next_called_after_a_value_already_ended_sees_stream_ended() {
    let stream = Observable::<i32>::new();
    stream.set_end();
    assert!(matches!(
        stream.next().result(None),
        Err(PactError::StreamEnded)
    ));
}

#[test]
fn set_end_resolves_pending_consumers_with_stream_ended() {
    let stream = Observable::<i32>::new();
    let pending = stream.next();
    stream.set_end();
    assert!(matches!(
        pending.result(Some(Duration::from_secs(1))),
        Err(PactError::StreamEnded)
    ));
}

#[test]
fn set_exception_resolves_pending_consumers_with_that_error() {
    let stream = Observable::<i32>::new();
    let pending = stream.next();
    stream.set_exception(PactError::invalid_state("producer died"));
    assert!(matches!(
        pending.result(Some(Duration::from_secs(1))),
        Err(PactError::InvalidState { .. })
    ));
}

#[test]
fn try_set_next_value_after_end_returns_false() {
    let stream = Observable::<i32>::new();
    stream.set_end();
    assert!(!stream.try_set_next_value(1));
}

#[test]
fn try_set_next_value_after_cancel_is_absorbed_as_true() {
    let stream = Observable::<i32>::new();
    stream.cancel();
    assert!(stream.try_set_next_value(1));
}

#[test]
fn cancel_resolves_pending_consumers_as_cancelled() {
    let stream = Observable::<i32>::new();
    let pending = stream.next();
    assert!(stream.cancel());
    assert!(stream.cancelled());
    assert!(matches!(
        pending.result(Some(Duration::from_secs(1))),
        Err(PactError::Cancelled)
    ));
}

#[test]
fn next_on_an_already_cancelled_stream_is_cancelled_immediately() {
    let stream = Observable::<i32>::new();
    stream.cancel();
    assert!(matches!(stream.next().result(None), Err(PactError::Cancelled)));
}

#[test]
fn terminate_is_idempotent() {
    let stream = Observable::<i32>::new();
    assert!(stream.set_end());
    assert!(!stream.set_end());
    assert!(!stream.cancel());
}

#[test]
fn add_observe_callback_sees_every_subsequent_value() {
    let stream = Observable::<i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    stream.add_observe_callback(
        move |fut| seen_clone.lock().unwrap().push(fut.result(None).unwrap()),
        None,
    );

    stream.set_next_value(1).unwrap();
    stream.set_next_value(2).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}

#[test]
fn remove_observe_callback_stops_further_delivery() {
    let stream = Observable::<i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let id = stream.add_observe_callback(
        move |fut| seen_clone.lock().unwrap().push(fut.result(None).unwrap()),
        None,
    );

    stream.set_next_value(1).unwrap();
    assert_eq!(stream.remove_observe_callback(id), 1);
    stream.set_next_value(2).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1]);
}

#[test]
fn set_end_notifies_observe_callbacks_with_stream_ended() {
    let stream = Observable::<i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    stream.add_observe_callback(
        move |fut| seen_clone.lock().unwrap().push(fut.result(None)),
        None,
    );

    stream.set_end();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], Err(PactError::StreamEnded)));
}

#[test]
fn set_exception_notifies_observe_callbacks_with_that_error() {
    let stream = Observable::<i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    stream.add_observe_callback(
        move |fut| seen_clone.lock().unwrap().push(fut.result(None)),
        None,
    );

    stream.set_exception(PactError::invalid_state("producer died"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], Err(PactError::InvalidState { .. })));
}

#[test]
fn cancel_notifies_observe_callbacks_as_cancelled() {
    let stream = Observable::<i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    stream.add_observe_callback(
        move |fut| seen_clone.lock().unwrap().push(fut.result(None)),
        None,
    );

    stream.cancel();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], Err(PactError::Cancelled)));
}

#[test]
fn cloning_shares_the_same_underlying_stream() {
    let stream = Observable::<i32>::new();
    let clone = stream.clone();
    let pending = clone.next();
    stream.set_next_value(5).unwrap();
    assert_eq!(pending.result(Some(Duration::from_secs(1))).unwrap(), 5);
}

#[test]
fn iterator_stops_cleanly_at_stream_end() {
    let stream = Observable::<i32>::new();
    // Register consumers before producing: set_next_value only fulfils an
    // already-pending consumer, it does not buffer for latecomers.
    let pending: Vec<_> = (0..3).map(|_| stream.next()).collect();
    for v in 0..3 {
        stream.set_next_value(v).unwrap();
    }
    stream.set_end();

    let collected: Vec<i32> = pending
        .into_iter()
        .map(|f| f.result(Some(Duration::from_secs(1))).unwrap())
        .collect();
    assert_eq!(collected, vec![0, 1, 2]);

    let mut iter = stream;
    assert!(iter.next().is_none());
}

#[test]
fn iterator_surfaces_a_failure_as_some_err_not_termination() {
    let stream = Observable::<i32>::new();
    stream.set_exception(PactError::invalid_state("boom"));

    let mut iter = stream;
    let outcome = iter.next().unwrap();
    assert!(matches!(outcome, Err(PactError::InvalidState { .. })));
}
