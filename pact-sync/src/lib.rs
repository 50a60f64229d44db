// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The synchronized future: mutex/condvar-guarded, blockable from any
//! thread (§4.4).
//!
//! Where `pact-core`'s `Future<T>`/`Promise<T>` share state through an
//! `Rc<RefCell<_>>` confined to one thread, [`SyncFuture<T>`]/[`SyncPromise<T>`]
//! share it through an `Arc<(Mutex<_>, Condvar)>`, so `result`/`exception`
//! can block the calling thread (optionally with a timeout) until the
//! future resolves.

mod logging;

mod bridge;
mod combinators;
mod config;
mod executor;
mod future;
mod guard;
mod promise;
mod state;

pub use bridge::compatible;
#[cfg(feature = "tokio-bridge")]
pub use bridge::from_std_future;
pub use config::{default_executor, set_default_executor, set_unhandled_error_sink};
pub use executor::{Executor, ExecutorHandle, Synchronous, Task};
pub use future::{CallbackId, SyncFuture};
pub use promise::{channel, channel_with_executor, SyncPromise};
