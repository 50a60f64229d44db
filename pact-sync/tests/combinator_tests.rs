// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use pact_error::PactError;
use pact_sync::SyncFuture;

#[test]
fn map_transforms_the_successful_value() {
    let future = SyncFuture::successful(2);
    let mapped = future.map(|v| v * 10, None);
    assert_eq!(mapped.result(None).unwrap(), 20);
}

#[test]
fn recover_replaces_a_failure_with_a_value() {
    let future = SyncFuture::<i32>::failed(PactError::timeout("slow"));
    let recovered = future.recover(|_err| -1, None);
    assert_eq!(recovered.result(None).unwrap(), -1);
}

#[test]
fn then_chains_into_the_next_future_on_success() {
    let future = SyncFuture::successful(1);
    let chained = future.then(|| SyncFuture::successful(2), None);
    assert_eq!(chained.result(None).unwrap(), 2);
}

#[test]
fn fallback_runs_on_failure() {
    let future = SyncFuture::<i32>::failed(PactError::timeout("slow"));
    let result = future.fallback(|| SyncFuture::successful(2), None);
    assert_eq!(result.result(None).unwrap(), 2);
}

#[test]
fn gather_collects_results_in_order() {
    let futures = vec![
        SyncFuture::successful(1),
        SyncFuture::successful(2),
        SyncFuture::successful(3),
    ];
    let gathered = SyncFuture::gather(futures, false, None);
    let results: Vec<i32> = gathered
        .result(None)
        .unwrap()
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(results, vec![1, 2, 3]);
}

#[test]
fn gather_fails_fast_on_first_child_failure() {
    let futures = vec![
        SyncFuture::successful(1),
        SyncFuture::<i32>::failed(PactError::timeout("slow")),
    ];
    let gathered = SyncFuture::gather(futures, false, None);
    assert!(matches!(gathered.result(None), Err(PactError::Timeout { .. })));
}

#[test]
fn gather_with_return_exceptions_collects_every_outcome() {
    let futures = vec![
        SyncFuture::successful(1),
        SyncFuture::<i32>::failed(PactError::timeout("slow")),
        SyncFuture::successful(3),
    ];
    let gathered = SyncFuture::gather(futures, true, None);
    let results = gathered.result(None).unwrap();
    assert_eq!(results[0].as_ref().unwrap(), &1);
    assert!(matches!(results[1], Err(PactError::Timeout { .. })));
    assert_eq!(results[2].as_ref().unwrap(), &3);
}

#[test]
fn first_adopts_whichever_child_resolves_first() {
    let (_p1, f1) = pact_sync::channel::<i32>();
    let f2 = SyncFuture::successful(2);
    let winner = SyncFuture::first(vec![f1, f2]).unwrap();
    assert_eq!(winner.result(Some(Duration::from_secs(1))).unwrap(), 2);
}

#[test]
fn first_successful_skips_failures_and_adopts_the_winner() {
    let futures = vec![
        SyncFuture::<i32>::failed(PactError::timeout("slow")),
        SyncFuture::successful(7),
    ];
    let winner = SyncFuture::first_successful(futures).unwrap();
    assert_eq!(winner.result(None).unwrap(), 7);
}

#[test]
fn reduce_folds_gathered_results() {
    let futures = vec![
        SyncFuture::successful(1),
        SyncFuture::successful(2),
        SyncFuture::successful(3),
    ];
    let total = SyncFuture::reduce(futures, 0, |acc, v| acc + v, None, None);
    assert_eq!(total.result(None).unwrap(), 6);
}
