// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use pact_error::PactError;
use pact_exec::ThreadPoolExecutor;
use pact_sync::{channel, ExecutorHandle};
use pact_test_utils::CountdownLatch;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn submit_resolves_with_the_closures_value() {
    let pool = ThreadPoolExecutor::new(tokio::runtime::Handle::current());
    let future = pool.submit(|| Ok(21 * 2));
    assert_eq!(future.result(Some(Duration::from_secs(2))).unwrap(), 42);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn submit_propagates_the_closures_failure() {
    let pool = ThreadPoolExecutor::new(tokio::runtime::Handle::current());
    let future: pact_sync::SyncFuture<i32> =
        pool.submit(|| Err(PactError::invalid_state("boom")));
    let error = future.result(Some(Duration::from_secs(2))).unwrap_err();
    assert!(matches!(error, PactError::InvalidState { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn schedule_runs_a_done_callback_on_the_pool() {
    let pool = ThreadPoolExecutor::new(tokio::runtime::Handle::current());
    let (promise, future) = channel::<i32>();
    let latch = CountdownLatch::new(1);
    let latch_for_callback = latch.clone();

    future.add_done_callback(
        move |fut| {
            assert_eq!(fut.result(None).unwrap(), 10);
            latch_for_callback.count_down();
        },
        Some(ExecutorHandle::new(pool)),
    );

    promise.set_result(10).unwrap();
    assert!(latch.wait(Duration::from_secs(2)));
}
