//! Errors recorded against a node or an enclosing block.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RunResult;

/// Why a node or block stopped.
///
/// An interruption carries the result the engine recorded when it stopped the
/// flow; everything else is a generic failure with a message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCause {
  #[error("{message}")]
  Generic { message: String },

  #[error("interrupted with result {result}")]
  Interruption { result: RunResult },
}

impl ErrorCause {
  pub fn generic(message: impl Into<String>) -> Self {
    ErrorCause::Generic {
      message: message.into(),
    }
  }

  pub fn interruption(result: RunResult) -> Self {
    ErrorCause::Interruption { result }
  }

  /// True only for an interruption whose recorded result is exactly `ABORTED`.
  pub fn is_interrupted_with_abort(&self) -> bool {
    matches!(
      self,
      ErrorCause::Interruption {
        result: RunResult::Aborted
      }
    )
  }
}

/// An error attached to a node, either its own or one propagated from its block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorAction {
  pub error: ErrorCause,
}

impl ErrorAction {
  pub fn new(error: ErrorCause) -> Self {
    Self { error }
  }

  pub fn message(&self) -> String {
    self.error.to_string()
  }
}

impl From<ErrorCause> for ErrorAction {
  fn from(error: ErrorCause) -> Self {
    Self::new(error)
  }
}
