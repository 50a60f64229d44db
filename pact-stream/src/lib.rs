// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Observable stream: a lazy, possibly-terminated sequence of values, each
//! consumed through a [`pact_sync::SyncFuture`] (§4.6).

mod logging;

mod guard;
mod observable;

pub use observable::{Observable, ObserveCallbackId};
