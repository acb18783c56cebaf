//! Timing window of a node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Start time and durations of a node, as measured by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingInfo {
  #[serde(default)]
  pub start_time: Option<DateTime<Utc>>,
  #[serde(default)]
  pub total_duration_millis: u64,
  #[serde(default)]
  pub pause_duration_millis: u64,
}

impl TimingInfo {
  pub fn new(
    start_time: Option<DateTime<Utc>>,
    total_duration_millis: u64,
    pause_duration_millis: u64,
  ) -> Self {
    Self {
      start_time,
      total_duration_millis,
      pause_duration_millis,
    }
  }

  /// Time spent running, excluding pauses.
  pub fn active_duration_millis(&self) -> u64 {
    self
      .total_duration_millis
      .saturating_sub(self.pause_duration_millis)
  }
}
