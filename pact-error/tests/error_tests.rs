// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pact_error::{PactError, Result, ResultExt};
use std::io;

#[test]
fn display_messages() {
    assert_eq!(PactError::Cancelled.to_string(), "cancelled");
    assert_eq!(
        PactError::timeout("waiting on f").to_string(),
        "operation timed out: waiting on f"
    );
    assert_eq!(
        PactError::invalid_state("already finished").to_string(),
        "invalid state: already finished"
    );
    assert_eq!(PactError::StreamEnded.to_string(), "stream ended");
}

#[test]
fn is_cancelled_only_matches_cancelled() {
    assert!(PactError::Cancelled.is_cancelled());
    assert!(!PactError::StreamEnded.is_cancelled());
    assert!(!PactError::timeout("x").is_cancelled());
}

#[test]
fn is_recoverable_is_timeout_only() {
    assert!(PactError::timeout("x").is_recoverable());
    assert!(!PactError::Cancelled.is_recoverable());
    assert!(!PactError::invalid_state("x").is_recoverable());
}

#[test]
fn is_programmer_error_covers_invalid_state_and_incompatible() {
    assert!(PactError::invalid_state("x").is_programmer_error());
    assert!(PactError::incompatible("different loops").is_programmer_error());
    assert!(!PactError::Cancelled.is_programmer_error());
    assert!(!PactError::timeout("x").is_programmer_error());
}

#[test]
fn user_error_wraps_foreign_errors() {
    let err = PactError::user(io::Error::other("boom"));
    assert!(matches!(err, PactError::User(_)));
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn clone_preserves_message_for_user_errors() {
    let err = PactError::user(io::Error::other("boom"));
    let cloned = err.clone();
    assert_eq!(err.to_string(), cloned.to_string());
}

#[test]
fn context_wraps_user_errors() {
    let result: Result<()> = Err(PactError::user(io::Error::other("disk full")));
    let err = result.context("flushing buffer").unwrap_err();
    assert!(err.to_string().contains("flushing buffer"));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn context_preserves_non_user_variants_but_prefixes_message() {
    let result: Result<()> = Err(PactError::Cancelled);
    let err = result.context("during shutdown").unwrap_err();
    assert!(matches!(err, PactError::Cancelled));
}

#[test]
fn context_is_noop_on_ok() {
    let result: Result<i32> = Ok(7);
    assert_eq!(result.context("unused").unwrap(), 7);
}
