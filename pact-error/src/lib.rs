// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error taxonomy shared by every future and stream variant in Pact.
//!
//! This crate defines the root [`PactError`] type. All layers — the
//! cooperative core, the synchronized variant, and the observable stream —
//! propagate failures as this single enum rather than raising across
//! thread boundaries.
//!
//! # Examples
//!
//! ```
//! use pact_error::{PactError, Result};
//!
//! fn process_data() -> Result<()> {
//!     Err(PactError::invalid_state("result was already set"))
//! }
//! ```

/// Root error type for all Pact operations.
///
/// `Cancelled`, `Timeout`, `InvalidState` and `StreamEnded` are the
/// built-in kinds a producer never has to construct by hand; `User`
/// carries whatever the caller's own callbacks raise.
#[derive(Debug, thiserror::Error)]
pub enum PactError {
    /// The future or stream was cancelled before it completed.
    #[error("cancelled")]
    Cancelled,

    /// A blocking wait exceeded its deadline. The future itself is left
    /// untouched — a later `wait`/`result` may still succeed.
    #[error("operation timed out: {context}")]
    Timeout {
        /// Description of what was being waited for.
        context: String,
    },

    /// The caller attempted an operation the state machine does not allow
    /// in the current state (re-setting a terminal future, reading a
    /// pending one without a timeout, double-ending a stream, ...).
    #[error("invalid state: {context}")]
    InvalidState {
        /// What was attempted and why it isn't allowed right now.
        context: String,
    },

    /// An observable stream has no more values to deliver.
    #[error("stream ended")]
    StreamEnded,

    /// Two futures passed to a combinator are not safe to combine (e.g.
    /// event-loop-bound futures bound to different loops).
    #[error("incompatible futures: {context}")]
    Incompatible {
        /// Why the inputs were rejected.
        context: String,
    },

    /// A user-supplied callback or value raised its own error.
    #[error("{0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PactError {
    /// Build an [`PactError::InvalidState`] from any displayable context.
    pub fn invalid_state(context: impl Into<String>) -> Self {
        Self::InvalidState {
            context: context.into(),
        }
    }

    /// Build a [`PactError::Timeout`].
    pub fn timeout(context: impl Into<String>) -> Self {
        Self::Timeout {
            context: context.into(),
        }
    }

    /// Build a [`PactError::Incompatible`].
    pub fn incompatible(context: impl Into<String>) -> Self {
        Self::Incompatible {
            context: context.into(),
        }
    }

    /// Wrap a foreign error as [`PactError::User`].
    pub fn user(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }

    /// Returns `true` for a cancellation — cancellation is an outcome the
    /// caller itself may have requested, not a defect.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` for conditions that a retry could plausibly clear
    /// (a timed-out wait leaves the future intact).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` for programmer errors: the caller misused the API
    /// rather than hit a transient condition.
    #[must_use]
    pub const fn is_programmer_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::Incompatible { .. })
    }
}

impl Clone for PactError {
    fn clone(&self) -> Self {
        match self {
            Self::Cancelled => Self::Cancelled,
            Self::Timeout { context } => Self::Timeout {
                context: context.clone(),
            },
            Self::InvalidState { context } => Self::InvalidState {
                context: context.clone(),
            },
            Self::StreamEnded => Self::StreamEnded,
            Self::Incompatible { context } => Self::Incompatible {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned generically; fold to text.
            Self::User(e) => Self::User(Box::new(ClonedUserError(e.to_string()))),
        }
    }
}

#[derive(Debug)]
struct ClonedUserError(String);

impl std::fmt::Display for ClonedUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ClonedUserError {}

/// Specialized `Result` for Pact operations.
pub type Result<T> = std::result::Result<T, PactError>;

/// Extension trait for converting foreign errors into [`PactError::User`].
pub trait IntoPactError {
    /// Wrap `self` as a [`PactError::User`].
    fn into_pact_error(self) -> PactError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoPactError for E {
    fn into_pact_error(self) -> PactError {
        PactError::user(self)
    }
}

/// Helper trait for adding context to a `Result` in a fluent style.
pub trait ResultExt<T> {
    /// Add static context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazily-computed context to an error.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PactError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| prepend_context(e.into(), &context.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| prepend_context(e.into(), &f()))
    }
}

fn prepend_context(err: PactError, context: &str) -> PactError {
    match err {
        PactError::User(inner) => PactError::InvalidState {
            context: format!("{context}: {inner}"),
        },
        PactError::InvalidState { context: inner } => PactError::InvalidState {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}
