// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::RefCell;
use std::rc::Rc;

use pact_core::{set_default_executor, set_unhandled_error_sink, Future, Synchronous};
use pact_error::PactError;

#[test]
fn guard_is_defused_when_a_callback_reads_the_result() {
    let reported = Rc::new(RefCell::new(false));
    let reported_clone = reported.clone();
    set_unhandled_error_sink(move |_| *reported_clone.borrow_mut() = true);

    {
        let future = Future::<i32>::failed(PactError::timeout("slow"));
        future.add_done_callback(
            move |fut| {
                let _ = fut.exception();
            },
            None,
        );
    }
    assert!(!*reported.borrow());
}

#[test]
fn guard_reports_when_a_callback_never_reads_the_outcome() {
    let reported = Rc::new(RefCell::new(false));
    let reported_clone = reported.clone();
    set_unhandled_error_sink(move |_| *reported_clone.borrow_mut() = true);

    {
        let future = Future::<i32>::failed(PactError::timeout("slow"));
        future.add_done_callback(|_fut| {}, None);
    }
    assert!(*reported.borrow());
}

#[test]
fn cancelled_future_never_arms_the_guard() {
    let reported = Rc::new(RefCell::new(false));
    let reported_clone = reported.clone();
    set_unhandled_error_sink(move |_| *reported_clone.borrow_mut() = true);

    {
        let (_promise, future) = pact_core::channel::<i32>();
        future.cancel();
    }
    assert!(!*reported.borrow());
}

#[test]
fn set_default_executor_is_picked_up_by_new_channels() {
    set_default_executor(Synchronous);
    let (promise, future) = pact_core::channel::<i32>();
    let ran = Rc::new(RefCell::new(false));
    let ran_clone = ran.clone();
    future.add_done_callback(move |_| *ran_clone.borrow_mut() = true, None);
    promise.set_result(1).unwrap();
    assert!(*ran.borrow());
}
