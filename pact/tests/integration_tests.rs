// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Exercises the executor contract crossing crate boundaries: `pact-exec`'s
//! reference executors driving `pact-core` and `pact-sync` futures, and
//! `pact-stream`'s observable dispatching through one of them.

use std::time::Duration;

use pact::cooperative::{channel_with_executor, compatible, LocalExecutorHandle};
use pact::exec::{EventLoop, ThreadPoolExecutor};
use pact::stream::Observable;
use pact::sync::{from_std_future, ExecutorHandle};
use pact::PactError;

#[test]
fn event_loop_executor_drives_a_cooperative_future_to_completion() {
    let event_loop = EventLoop::new();
    let (promise, future) =
        channel_with_executor::<i32>(LocalExecutorHandle::new(event_loop.executor()));

    let doubled = future.map(|x| x * 2, None);
    promise.set_result(21).unwrap();
    // `map`'s callback was scheduled onto the loop, not run inline.
    assert!(!doubled.done());

    event_loop.run_until_idle();
    assert_eq!(doubled.result().unwrap(), 42);
}

#[test]
fn combinators_reject_futures_bound_to_different_event_loops() {
    let loop_a = EventLoop::new();
    let loop_b = EventLoop::new();
    let (_pa, future_a) = channel_with_executor::<i32>(LocalExecutorHandle::new(loop_a.executor()));
    let (_pb, future_b) = channel_with_executor::<i32>(LocalExecutorHandle::new(loop_b.executor()));

    assert!(matches!(
        compatible(&[future_a, future_b]).unwrap_err(),
        PactError::Incompatible { .. }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn observable_dispatches_observe_callbacks_through_the_thread_pool() {
    let pool = ThreadPoolExecutor::new(tokio::runtime::Handle::current());
    let observable = Observable::<i32>::new();
    let (done_tx, done_rx) = std::sync::mpsc::channel();

    observable.add_observe_callback(
        move |fut| {
            let _ = done_tx.send(fut.result(None).unwrap());
        },
        Some(ExecutorHandle::new(pool)),
    );

    observable.set_next_value(7).unwrap();
    assert_eq!(done_rx.recv_timeout(Duration::from_secs(2)).unwrap(), 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sync_future_adopts_a_foreign_tokio_task() {
    let bridged = from_std_future(async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(99)
    });

    assert_eq!(bridged.result(Some(Duration::from_secs(2))).unwrap(), 99);
}
