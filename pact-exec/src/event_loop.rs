// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! An event-loop executor (§6/§4.5): `call_soon`/`call_soon_threadsafe`,
//! plus a stable loop identity so combinators can reject futures bound to
//! different loops (§4.4's `compatible` check).
//!
//! This is a reference implementation, not a reactor: it has no I/O
//! readiness polling of its own. It exists so an event-loop-bound
//! [`pact_core::Future`] can be driven end to end in tests — submit work
//! with `call_soon`/`call_soon_threadsafe`, then call [`EventLoop::run_until_idle`]
//! on the owning thread to drain it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::mpsc;
use std::sync::atomic::{AtomicU64, Ordering};

use pact_core::{LocalExecutor, Task};

fn next_loop_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// A single-threaded run loop. `!Send` by construction (its local queue is
/// `Rc`-backed) — only [`EventLoopExecutor`]'s `call_soon_threadsafe` may be
/// invoked from another thread.
pub struct EventLoop {
    id: u64,
    local: Rc<RefCell<VecDeque<Task>>>,
    remote_tx: mpsc::Sender<Box<dyn FnOnce() + Send>>,
    remote_rx: mpsc::Receiver<Box<dyn FnOnce() + Send>>,
}

impl EventLoop {
    pub fn new() -> Self {
        let (remote_tx, remote_rx) = mpsc::channel();
        Self {
            id: next_loop_id(),
            local: Rc::new(RefCell::new(VecDeque::new())),
            remote_tx,
            remote_rx,
        }
    }

    /// A cheaply cloneable handle bound to this loop, for use as a
    /// future's default executor or as a named callback executor.
    pub fn executor(&self) -> EventLoopExecutor {
        EventLoopExecutor {
            id: self.id,
            local: self.local.clone(),
            remote_tx: self.remote_tx.clone(),
        }
    }

    /// Drain every queued local and cross-thread task, including ones
    /// scheduled by tasks that ran during this same call, until none
    /// remain. Must be called from the thread that owns this loop.
    pub fn run_until_idle(&self) {
        loop {
            let mut ran = false;
            while let Some(task) = self.local.borrow_mut().pop_front() {
                task();
                ran = true;
            }
            while let Ok(task) = self.remote_rx.try_recv() {
                task();
                ran = true;
            }
            if !ran {
                break;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to an [`EventLoop`], usable as a [`LocalExecutor`]. Cloning is
/// cheap and shares the same loop (same `loop_id`, same queues).
#[derive(Clone)]
pub struct EventLoopExecutor {
    id: u64,
    local: Rc<RefCell<VecDeque<Task>>>,
    remote_tx: mpsc::Sender<Box<dyn FnOnce() + Send>>,
}

impl EventLoopExecutor {
    /// Queue `task` from the loop's own thread. Equivalent to `schedule`;
    /// named to match §6's `call_soon(fn, arg)`.
    pub fn call_soon<F: FnOnce() + 'static>(&self, task: F) {
        self.local.borrow_mut().push_back(Box::new(task));
    }

    /// Queue `task` from any thread, marshalling it back onto the loop's
    /// owning thread for the next [`EventLoop::run_until_idle`]. Per §6,
    /// this is the variant "used when a foreign-thread callback must
    /// marshal back into the loop".
    pub fn call_soon_threadsafe<F: FnOnce() + Send + 'static>(&self, task: F) {
        // The receiver is dropped along with the `EventLoop`; a loop that
        // has gone out of scope simply drops work scheduled onto it.
        let _ = self.remote_tx.send(Box::new(task));
    }
}

impl LocalExecutor for EventLoopExecutor {
    fn schedule(&self, task: Task) {
        self.call_soon(move || task());
    }

    fn loop_id(&self) -> Option<u64> {
        Some(self.id)
    }
}
