// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Reference executors satisfying §6's executor contract.
//!
//! `pact-core` and `pact-sync` each ship a trivial `Synchronous` executor
//! that runs inline at submission — enough to be the lazily-initialised
//! process default, but not enough to exercise deferred dispatch, cross-loop
//! compatibility checks, or a pool that returns its own future. This crate
//! supplies the two additional executor shapes §6 names: a *pool executor*
//! (`submit(fn) -> future`) and an *event-loop executor*
//! (`call_soon`/`call_soon_threadsafe`). Neither is a production scheduler;
//! both exist to make the executor contract testable end to end.

#[macro_use]
mod logging;

mod event_loop;
mod pool;

pub use event_loop::{EventLoop, EventLoopExecutor};
pub use pool::ThreadPoolExecutor;
