// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adopting foreign async values.
//!
//! The original's `Future.convert()` let a multithreaded future transparently
//! adopt a single-threaded (cooperative) one, since Python has no
//! thread-confinement type system. That doesn't hold in Rust: a cooperative
//! [`pact_core::Future`] is `Rc`-backed and therefore `!Send`, so it cannot
//! soundly cross into a synchronized future that may be waited on from any
//! thread. `convert` here adopts a different, Rust-native source instead: any
//! `Send`-able `std::future::Future`, driven to completion on a tokio task.

use crate::future::SyncFuture;
use crate::promise::channel;

/// Drive `fut` to completion on the current tokio runtime and reflect its
/// outcome into the returned [`SyncFuture`].
///
/// Requires the `tokio-bridge` feature and a tokio runtime to already be
/// running (`#[tokio::main]` or inside `Runtime::block_on`).
#[cfg(feature = "tokio-bridge")]
pub fn from_std_future<T, F>(fut: F) -> SyncFuture<T>
where
    T: Send + 'static,
    F: std::future::Future<Output = pact_error::Result<T>> + Send + 'static,
{
    let (promise, future) = channel::<T>();
    tokio::spawn(async move {
        let outcome = fut.await;
        promise.complete(|| outcome);
    });
    future
}

/// Returns `true` if `futures` can share a downstream combinator. The
/// synchronized variant has no event-loop concept of its own (`§4.4`'s
/// same-loop invariant is cooperative-only), so this always succeeds; kept
/// for API symmetry with `pact_core::compatible`.
pub fn compatible<T>(_futures: &[SyncFuture<T>]) -> pact_error::Result<()> {
    Ok(())
}
