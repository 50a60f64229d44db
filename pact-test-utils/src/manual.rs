// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Executors that queue scheduled work instead of running it, so a test
//! can assert on dispatch ordering by draining the queue at a chosen point
//! rather than racing a background thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use pact_core::{LocalExecutor, Task as LocalTask};
use pact_sync::{Executor, Task as SyncTask};

/// Cooperative-variant manual executor. Every clone shares the same queue.
#[derive(Clone, Default)]
pub struct ManualExecutor {
    queue: Rc<RefCell<VecDeque<LocalTask>>>,
}

impl ManualExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every queued task, in the order it was scheduled, including
    /// ones scheduled by a task that ran during this same drain.
    pub fn drain(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    /// Run exactly one queued task, if any. Returns whether one ran.
    pub fn run_one(&self) -> bool {
        match self.queue.borrow_mut().pop_front() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

impl LocalExecutor for ManualExecutor {
    fn schedule(&self, task: LocalTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

/// Synchronized-variant manual executor: `Send + Sync`, queue guarded by a
/// `std::sync::Mutex` since nothing here blocks long enough to warrant
/// `parking_lot`'s extra API surface.
#[derive(Clone, Default)]
pub struct ManualSyncExecutor {
    queue: Arc<Mutex<VecDeque<SyncTask>>>,
}

impl ManualSyncExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().expect("executor mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn drain(&self) {
        loop {
            let next = self.queue.lock().expect("executor mutex poisoned").pop_front();
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    pub fn run_one(&self) -> bool {
        let next = self.queue.lock().expect("executor mutex poisoned").pop_front();
        match next {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

impl Executor for ManualSyncExecutor {
    fn schedule(&self, task: SyncTask) {
        self.queue.lock().expect("executor mutex poisoned").push_back(task);
    }
}
