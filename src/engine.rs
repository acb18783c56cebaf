//! Interfaces to the workflow engine and the collaborators injected into node construction.
//!
//! The engine owns raw nodes and runs; this crate only reads them through
//! [FlowNode] and [PipelineRun]. Display labels, loggability and the
//! cause-of-blockage lookup are rules owned elsewhere, so they arrive as trait
//! objects bundled in an [EngineContext].

use std::fmt;
use std::sync::Arc;

use crate::error::BlockageError;
use crate::types::{ErrorAction, NodeKind};

/// Step kind of the block that allocates an executor.
pub const EXECUTOR_STEP: &str = "node";

/// A raw node of the engine's execution graph.
pub trait FlowNode: fmt::Debug + Send + Sync {
  fn id(&self) -> &str;

  fn kind(&self) -> &NodeKind;

  /// Node opens a stage.
  fn is_stage(&self) -> bool;

  /// Node opens a branch of a `parallel` block.
  fn is_parallel_branch(&self) -> bool;

  /// Engine-derived display name (e.g. "Shell Script").
  fn display_name(&self) -> &str;

  /// Label given by the pipeline author (stage name, branch name).
  fn label(&self) -> Option<&str> {
    None
  }

  /// Error recorded on this node itself.
  fn error(&self) -> Option<&ErrorAction> {
    None
  }

  /// Step arguments rendered for humans (e.g. the shell command).
  fn step_arguments(&self) -> Option<String> {
    None
  }

  fn has_log(&self) -> bool {
    false
  }
}

/// One execution of a pipeline. Only carried through, never introspected.
pub trait PipelineRun: fmt::Debug + Send + Sync {
  fn id(&self) -> &str;

  fn pipeline(&self) -> &str;
}

/// Explains why an executor-allocation step has not proceeded yet.
pub trait BlockageResolver: Send + Sync {
  /// `Ok(None)` means nothing is blocking the node.
  fn cause_of_blockage(
    &self,
    node: &dyn FlowNode,
    run: &dyn PipelineRun,
  ) -> Result<Option<String>, BlockageError>;
}

/// Produces the default display name of a node. `None` falls back to
/// [FlowNode::display_name].
pub trait LabelResolver: Send + Sync {
  fn display_name(&self, node: &dyn FlowNode) -> Option<String>;
}

/// Decides whether a node has a log worth showing.
pub trait LoggabilityClassifier: Send + Sync {
  fn is_loggable(&self, node: &dyn FlowNode) -> bool;
}

/// Stages and parallel branches show their author-given label; everything
/// else keeps the engine's display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineLabels;

impl LabelResolver for EngineLabels {
  fn display_name(&self, node: &dyn FlowNode) -> Option<String> {
    if node.is_stage() || node.is_parallel_branch() {
      node.label().map(str::to_string)
    } else {
      None
    }
  }
}

/// A node is loggable when the engine recorded a log for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogActionLoggability;

impl LoggabilityClassifier for LogActionLoggability {
  fn is_loggable(&self, node: &dyn FlowNode) -> bool {
    node.has_log()
  }
}

/// Nothing is ever blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlockage;

impl BlockageResolver for NoBlockage {
  fn cause_of_blockage(
    &self,
    _node: &dyn FlowNode,
    _run: &dyn PipelineRun,
  ) -> Result<Option<String>, BlockageError> {
    Ok(None)
  }
}

/// Collaborators used while wrapping nodes.
#[derive(Clone)]
pub struct EngineContext {
  pub labels: Arc<dyn LabelResolver>,
  pub loggability: Arc<dyn LoggabilityClassifier>,
  pub blockage: Arc<dyn BlockageResolver>,
  /// Step kind recognized as executor allocation.
  pub executor_step: String,
}

impl EngineContext {
  pub fn with_labels(mut self, labels: Arc<dyn LabelResolver>) -> Self {
    self.labels = labels;
    self
  }

  pub fn with_loggability(mut self, loggability: Arc<dyn LoggabilityClassifier>) -> Self {
    self.loggability = loggability;
    self
  }

  pub fn with_blockage(mut self, blockage: Arc<dyn BlockageResolver>) -> Self {
    self.blockage = blockage;
    self
  }

  pub fn with_executor_step(mut self, step: impl Into<String>) -> Self {
    self.executor_step = step.into();
    self
  }
}

impl Default for EngineContext {
  fn default() -> Self {
    Self {
      labels: Arc::new(EngineLabels),
      loggability: Arc::new(LogActionLoggability),
      blockage: Arc::new(NoBlockage),
      executor_step: EXECUTOR_STEP.to_string(),
    }
  }
}

impl fmt::Debug for EngineContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EngineContext")
      .field("executor_step", &self.executor_step)
      .finish_non_exhaustive()
  }
}
