//! Tests for `ErrorAction` and `ErrorCause`.

use super::{ErrorAction, ErrorCause, RunResult};

#[test]
fn generic_message() {
  let a = ErrorAction::new(ErrorCause::generic("script returned exit code 1"));
  assert_eq!(a.message(), "script returned exit code 1");
}

#[test]
fn interruption_message_names_result() {
  let a = ErrorAction::from(ErrorCause::interruption(RunResult::Aborted));
  assert_eq!(a.message(), "interrupted with result ABORTED");
}

#[test]
fn only_aborted_interruption_is_abort() {
  assert!(ErrorCause::interruption(RunResult::Aborted).is_interrupted_with_abort());
  assert!(!ErrorCause::interruption(RunResult::Failure).is_interrupted_with_abort());
  assert!(!ErrorCause::interruption(RunResult::NotBuilt).is_interrupted_with_abort());
  assert!(!ErrorCause::generic("aborted").is_interrupted_with_abort());
}

#[test]
fn cause_is_std_error() {
  let e: Box<dyn std::error::Error> = Box::new(ErrorCause::generic("boom"));
  assert_eq!(e.to_string(), "boom");
}

#[test]
fn deserializes_tagged_cause() {
  let a: ErrorAction =
    serde_json::from_str(r#"{"kind":"interruption","result":"ABORTED"}"#).unwrap();
  assert!(a.error.is_interrupted_with_abort());
  let g: ErrorAction =
    serde_json::from_str(r#"{"kind":"generic","message":"oops"}"#).unwrap();
  assert_eq!(g.message(), "oops");
}
