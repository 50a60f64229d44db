// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The cooperative future: single logical thread, no locks (§5).
//!
//! A [`Future<T>`]/[`Promise<T>`] pair shares state through an `Rc<RefCell<_>>`
//! rather than an `Arc<Mutex<_>>` — cheap to clone, confined to one thread by
//! construction (`Rc` isn't `Send`). The synchronized variant in `pact-sync`
//! covers the cross-thread case.

mod logging;

mod combinators;
mod config;
mod executor;
mod future;
mod guard;
mod promise;
mod state;

pub use combinators::compatible;
pub use config::{default_executor, set_default_executor, set_unhandled_error_sink};
pub use executor::{LocalExecutor, LocalExecutorHandle, Synchronous, Task};
pub use future::{CallbackId, Future};
pub use promise::{channel, channel_with_executor, Promise};
