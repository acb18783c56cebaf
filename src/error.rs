//! Error types.

use thiserror::Error;

use crate::types::NodeKind;

/// The engine produced a node with no presentation type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flow node {id}, kind: {kind}")]
pub struct ClassificationError {
  pub id: String,
  pub kind: NodeKind,
}

/// Failure of the cause-of-blockage lookup.
#[derive(Debug, Error)]
pub enum BlockageError {
  #[error("blockage lookup interrupted")]
  Interrupted,

  #[error("blockage lookup failed: {0}")]
  Io(#[from] std::io::Error),
}

/// Failure assembling or publishing a [crate::graph::PipelineGraph].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("node {0} is already wrapped")]
  DuplicateNode(String),

  #[error("node not found: {0}")]
  UnknownNode(String),

  #[error("parent {parent} of node {child} was discovered after it")]
  ParentAfterChild { parent: String, child: String },

  #[error(transparent)]
  Classification(#[from] ClassificationError),
}

/// Failure loading or walking a recorded graph document.
#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("reading document: {0}")]
  Io(#[from] std::io::Error),

  #[error("parsing document: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Graph(#[from] GraphError),
}
