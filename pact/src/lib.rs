// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! # Pact
//!
//! Layered promise/future concurrency primitives sharing one state
//! machine, callback registry, and combinator algebra (`map`, `recover`,
//! `then`, `fallback`, `gather`, `first`, `first_successful`, `reduce`),
//! plus an observable stream built on the same machinery.
//!
//! Three layers, re-exported here under their own namespace since the
//! cooperative and synchronized variants intentionally share method names
//! (`channel`, `Future`/`SyncFuture`'s shape, `Synchronous`, ...):
//!
//! - [`cooperative`] (`pact-core`) — single logical thread, no locks; a
//!   [`cooperative::Future`]/[`cooperative::Promise`] pair shares state
//!   through an `Rc`.
//! - [`sync`] (`pact-sync`) — mutex/condvar-guarded, blockable from any
//!   thread via `wait`/`result`/`exception(timeout)`; can adopt a
//!   cooperative future or a foreign `std::future::Future`.
//! - [`exec`] (`pact-exec`) — reference executors (a thread-pool executor,
//!   an event-loop executor) satisfying both variants' executor contract.
//!
//! [`stream::Observable`] reuses the synchronized variant's state,
//! callback, and cancellation machinery to model a lazy, possibly-erroring
//! sequence of values, consumed through a pull interface (`next()`) or a
//! push interface (`add_observe_callback`).
//!
//! ## Quick start
//!
//! ```
//! use pact::prelude::*;
//!
//! let (promise, future) = channel::<i32>();
//! let doubled = future.map(|x| x * 2, None);
//! promise.set_result(21).unwrap();
//! assert_eq!(doubled.result().unwrap(), 42);
//! ```

pub use pact_error as error;
pub use pact_core as cooperative;
pub use pact_exec as exec;
pub use pact_stream as stream;
pub use pact_sync as sync;

pub use pact_error::{PactError, Result};

/// Convenient imports for the cooperative variant plus the error taxonomy
/// every variant shares. Reach for [`sync`] or [`stream`] directly for the
/// synchronized future or the observable stream.
pub mod prelude {
    pub use pact_core::{
        channel, channel_with_executor, compatible, default_executor, set_default_executor,
        set_unhandled_error_sink, CallbackId, Future, LocalExecutor, LocalExecutorHandle, Promise,
        Synchronous,
    };
    pub use pact_error::{PactError, Result};
}
