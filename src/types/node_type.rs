//! Structural kind of a raw node and the presentation type derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::engine::FlowNode;
use crate::error::ClassificationError;

/// Shape of a raw execution node as the engine records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  /// A single executable step.
  Atom,
  /// Start of a block step (`stage`, `parallel` branch, `node`, ...).
  StepStart { step: String },
  BlockEnd,
  FlowStart,
  FlowEnd,
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::Atom => write!(f, "atom"),
      NodeKind::StepStart { step } => write!(f, "step_start({})", step),
      NodeKind::BlockEnd => write!(f, "block_end"),
      NodeKind::FlowStart => write!(f, "flow_start"),
      NodeKind::FlowEnd => write!(f, "flow_end"),
    }
  }
}

/// Presentation type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
  Stage,
  Parallel,
  Step,
}

impl fmt::Display for NodeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeType::Stage => write!(f, "STAGE"),
      NodeType::Parallel => write!(f, "PARALLEL"),
      NodeType::Step => write!(f, "STEP"),
    }
  }
}

/// Classifies a raw node: stage marker, then parallel-branch marker, then atom.
///
/// Any other shape means the engine handed us something the walker should
/// never wrap, so it is an error rather than a default.
#[instrument(level = "trace", skip(node), fields(id = node.id()))]
pub fn classify(node: &dyn FlowNode) -> Result<NodeType, ClassificationError> {
  if node.is_stage() {
    Ok(NodeType::Stage)
  } else if node.is_parallel_branch() {
    Ok(NodeType::Parallel)
  } else if *node.kind() == NodeKind::Atom {
    Ok(NodeType::Step)
  } else {
    Err(ClassificationError {
      id: node.id().to_string(),
      kind: node.kind().clone(),
    })
  }
}
