//! Tests for `NodeRunStatus`, `RunResult` and `RunState`.

use super::{NodeRunStatus, ParseRunStateError, RunResult, RunState};

#[test]
fn display_result() {
  assert_eq!(RunResult::Success.to_string(), "SUCCESS");
  assert_eq!(RunResult::NotBuilt.to_string(), "NOT_BUILT");
  assert_eq!(RunResult::Unknown.to_string(), "UNKNOWN");
}

#[test]
fn display_state() {
  assert_eq!(RunState::Queued.to_string(), "QUEUED");
  assert_eq!(RunState::Finished.to_string(), "FINISHED");
}

#[test]
fn display_pair() {
  assert_eq!(
    NodeRunStatus::finished_aborted().to_string(),
    "(ABORTED, FINISHED)"
  );
}

#[test]
fn eq_is_by_both_fields() {
  let a = NodeRunStatus::new(RunResult::Success, RunState::Finished);
  assert_eq!(a, NodeRunStatus::finished_success());
  assert_ne!(a, NodeRunStatus::new(RunResult::Success, RunState::Running));
  assert_ne!(a, NodeRunStatus::finished_failure());
}

#[test]
fn queued_is_unknown_result() {
  let q = NodeRunStatus::queued();
  assert_eq!(q.result, RunResult::Unknown);
  assert_eq!(q.state, RunState::Queued);
}

#[test]
fn serializes_with_rest_vocabulary() {
  let json = serde_json::to_value(NodeRunStatus::new(RunResult::NotBuilt, RunState::Paused)).unwrap();
  assert_eq!(json["result"], "NOT_BUILT");
  assert_eq!(json["state"], "PAUSED");
}

#[test]
fn deserializes_state() {
  let s: RunState = serde_json::from_str("\"RUNNING\"").unwrap();
  assert_eq!(s, RunState::Running);
}

#[test]
fn parse_state_case_insensitive() {
  assert_eq!("queued".parse::<RunState>(), Ok(RunState::Queued));
  assert_eq!(" NOT_BUILT ".parse::<RunState>(), Ok(RunState::NotBuilt));
}

#[test]
fn parse_state_rejects_unknown() {
  assert_eq!(
    "done".parse::<RunState>(),
    Err(ParseRunStateError("done".to_string()))
  );
}
