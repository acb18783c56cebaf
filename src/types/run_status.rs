//! Run result, lifecycle state and the `(result, state)` pair reported for a node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a run or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResult {
  Success,
  Failure,
  Aborted,
  Unstable,
  NotBuilt,
  Unknown,
}

impl fmt::Display for RunResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunResult::Success => write!(f, "SUCCESS"),
      RunResult::Failure => write!(f, "FAILURE"),
      RunResult::Aborted => write!(f, "ABORTED"),
      RunResult::Unstable => write!(f, "UNSTABLE"),
      RunResult::NotBuilt => write!(f, "NOT_BUILT"),
      RunResult::Unknown => write!(f, "UNKNOWN"),
    }
  }
}

/// Lifecycle state of a run or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
  Queued,
  Running,
  Paused,
  Skipped,
  NotBuilt,
  Finished,
}

impl fmt::Display for RunState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunState::Queued => write!(f, "QUEUED"),
      RunState::Running => write!(f, "RUNNING"),
      RunState::Paused => write!(f, "PAUSED"),
      RunState::Skipped => write!(f, "SKIPPED"),
      RunState::NotBuilt => write!(f, "NOT_BUILT"),
      RunState::Finished => write!(f, "FINISHED"),
    }
  }
}

/// A state name that is not part of the run-state vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown run state: {0}")]
pub struct ParseRunStateError(pub String);

impl FromStr for RunState {
  type Err = ParseRunStateError;

  /// Accepts the REST names case-insensitively (`queued`, `NOT_BUILT`, ...).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "QUEUED" => Ok(RunState::Queued),
      "RUNNING" => Ok(RunState::Running),
      "PAUSED" => Ok(RunState::Paused),
      "SKIPPED" => Ok(RunState::Skipped),
      "NOT_BUILT" => Ok(RunState::NotBuilt),
      "FINISHED" => Ok(RunState::Finished),
      _ => Err(ParseRunStateError(s.to_string())),
    }
  }
}

/// Resolved status of a node: what happened and where it is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRunStatus {
  pub result: RunResult,
  pub state: RunState,
}

impl NodeRunStatus {
  pub const fn new(result: RunResult, state: RunState) -> Self {
    Self { result, state }
  }

  /// `(SUCCESS, FINISHED)`
  pub const fn finished_success() -> Self {
    Self::new(RunResult::Success, RunState::Finished)
  }

  /// `(FAILURE, FINISHED)`
  pub const fn finished_failure() -> Self {
    Self::new(RunResult::Failure, RunState::Finished)
  }

  /// `(ABORTED, FINISHED)`
  pub const fn finished_aborted() -> Self {
    Self::new(RunResult::Aborted, RunState::Finished)
  }

  /// `(UNKNOWN, QUEUED)`, a node that is still waiting.
  pub const fn queued() -> Self {
    Self::new(RunResult::Unknown, RunState::Queued)
  }
}

impl fmt::Display for NodeRunStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.result, self.state)
  }
}
