//! Descriptor of a node waiting for external input.

use serde::{Deserialize, Serialize};

/// A pending input request (e.g. "Deploy to production?").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStep {
  pub id: String,
  pub message: String,
  /// Caption of the proceed button.
  #[serde(default)]
  pub ok: Option<String>,
  /// Who may answer; `None` means anyone.
  #[serde(default)]
  pub submitter: Option<String>,
}
