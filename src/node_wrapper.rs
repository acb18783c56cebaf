//! Presentation node wrapping one raw execution node.
//!
//! A [FlowNodeWrapper] is built once per raw node by the graph walker, linked
//! to its children (by id) and parents (by reference), optionally handed the
//! error of its enclosing block, and then published read-only.
//!
//! Status is resolved on every call to [FlowNodeWrapper::status]:
//!
//! - no block error: the status the engine observed for the node
//! - block error from an interruption recorded as `ABORTED`: `(ABORTED, FINISHED)`
//! - any other block error: `(FAILURE, FINISHED)`
//!
//! The node's own error never changes the resolved status; it is only exposed
//! as text through [FlowNodeWrapper::node_error].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::engine::{EngineContext, FlowNode, LoggabilityClassifier, PipelineRun};
use crate::error::ClassificationError;
use crate::types::{
  ErrorAction, InputStep, NodeKind, NodeRunStatus, NodeType, TimingInfo, classify,
};

/// Returns the first value produced by `candidates`, evaluated in order.
/// Later producers are not called once one yields a value.
pub(crate) fn first_present<T>(candidates: &[&dyn Fn() -> Option<T>]) -> Option<T> {
  candidates.iter().find_map(|produce| produce())
}

/// Display name of `node`: the label resolver's choice, else the engine's own name.
pub(crate) fn resolve_display_name(node: &dyn FlowNode, ctx: &EngineContext) -> String {
  resolve_display_name_with(None, node, ctx)
}

fn resolve_display_name_with(
  explicit: Option<String>,
  node: &dyn FlowNode,
  ctx: &EngineContext,
) -> String {
  first_present::<String>(&[
    &|| explicit.clone(),
    &|| ctx.labels.display_name(node),
    &|| Some(node.display_name().to_string()),
  ])
  .unwrap_or_default()
}

/// A raw node with its resolved type, status, text and graph links.
pub struct FlowNodeWrapper {
  node: Arc<dyn FlowNode>,
  status: NodeRunStatus,
  timing: TimingInfo,
  node_type: NodeType,
  display_name: String,
  description: Option<String>,
  input_step: Option<InputStep>,
  run: Arc<dyn PipelineRun>,
  loggability: Arc<dyn LoggabilityClassifier>,
  edges: Vec<String>,
  parents: Vec<Arc<FlowNodeWrapper>>,
  block_error: Option<ErrorAction>,
  cause_of_failure: Option<String>,
}

impl FlowNodeWrapper {
  /// Wraps a stage, parallel branch or step node.
  pub fn new(
    node: Arc<dyn FlowNode>,
    status: NodeRunStatus,
    timing: TimingInfo,
    run: Arc<dyn PipelineRun>,
    ctx: &EngineContext,
  ) -> Result<Self, ClassificationError> {
    Self::with_input(node, status, timing, None, run, ctx)
  }

  /// Like [FlowNodeWrapper::new], for a node that may be waiting on input.
  pub fn with_input(
    node: Arc<dyn FlowNode>,
    status: NodeRunStatus,
    timing: TimingInfo,
    input_step: Option<InputStep>,
    run: Arc<dyn PipelineRun>,
    ctx: &EngineContext,
  ) -> Result<Self, ClassificationError> {
    let node_type = classify(node.as_ref())?;
    Ok(Self::build(
      node, status, timing, node_type, None, None, input_step, run, ctx,
    ))
  }

  /// Wraps the start of an executor-allocation block, or returns `None` for
  /// any other node.
  ///
  /// While the engine reports a cause of blockage the node is queued and the
  /// cause becomes its description; otherwise allocation is considered done.
  /// A failed lookup counts as no cause.
  #[instrument(level = "trace", skip_all, fields(id = node.id()))]
  pub fn node_allocation(
    node: Arc<dyn FlowNode>,
    run: Arc<dyn PipelineRun>,
    ctx: &EngineContext,
  ) -> Option<Self> {
    match node.kind() {
      NodeKind::StepStart { step } if *step == ctx.executor_step => {}
      _ => return None,
    }

    let cause = match ctx.blockage.cause_of_blockage(node.as_ref(), run.as_ref()) {
      Ok(cause) => cause,
      Err(e) => {
        warn!(id = node.id(), error = %e, "cause of blockage lookup failed; assuming none");
        None
      }
    };

    let (status, description) = match cause {
      None => (
        NodeRunStatus::finished_success(),
        resolve_display_name(node.as_ref(), ctx),
      ),
      Some(cause) => (NodeRunStatus::queued(), cause),
    };
    debug!(id = node.id(), %status, "wrapped executor allocation");

    Some(Self::build(
      node,
      status,
      TimingInfo::default(),
      NodeType::Step,
      None,
      Some(description),
      None,
      run,
      ctx,
    ))
  }

  #[allow(clippy::too_many_arguments)]
  fn build(
    node: Arc<dyn FlowNode>,
    status: NodeRunStatus,
    timing: TimingInfo,
    node_type: NodeType,
    display_name: Option<String>,
    description: Option<String>,
    input_step: Option<InputStep>,
    run: Arc<dyn PipelineRun>,
    ctx: &EngineContext,
  ) -> Self {
    let display_name = resolve_display_name_with(display_name, node.as_ref(), ctx);
    let description =
      first_present::<String>(&[&|| description.clone(), &|| node.step_arguments()]);
    Self {
      node,
      status,
      timing,
      node_type,
      display_name,
      description,
      input_step,
      run,
      loggability: Arc::clone(&ctx.loggability),
      edges: Vec::new(),
      parents: Vec::new(),
      block_error: None,
      cause_of_failure: None,
    }
  }

  pub fn id(&self) -> &str {
    self.node.id()
  }

  pub fn node(&self) -> &Arc<dyn FlowNode> {
    &self.node
  }

  pub fn run(&self) -> &Arc<dyn PipelineRun> {
    &self.run
  }

  pub fn node_type(&self) -> NodeType {
    self.node_type
  }

  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn timing(&self) -> &TimingInfo {
    &self.timing
  }

  pub fn input_step(&self) -> Option<&InputStep> {
    self.input_step.as_ref()
  }

  /// Resolved status, shadowed by the block error when one is attached.
  pub fn status(&self) -> NodeRunStatus {
    match &self.block_error {
      None => self.status,
      Some(action) if action.error.is_interrupted_with_abort() => {
        NodeRunStatus::finished_aborted()
      }
      Some(_) => NodeRunStatus::finished_failure(),
    }
  }

  /// Status as the engine observed it, ignoring any block error.
  pub fn base_status(&self) -> NodeRunStatus {
    self.status
  }

  pub fn edges(&self) -> &[String] {
    &self.edges
  }

  pub fn add_edge(&mut self, id: impl Into<String>) {
    self.edges.push(id.into());
  }

  pub fn add_edges<I, S>(&mut self, ids: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.edges.extend(ids.into_iter().map(Into::into));
  }

  pub fn parents(&self) -> &[Arc<FlowNodeWrapper>] {
    &self.parents
  }

  pub fn add_parent(&mut self, parent: Arc<FlowNodeWrapper>) {
    self.parents.push(parent);
  }

  pub fn add_parents(&mut self, parents: &[Arc<FlowNodeWrapper>]) {
    self.parents.extend_from_slice(parents);
  }

  /// Primary structural parent, e.g. the branch a merge node came from first.
  pub fn first_parent(&self) -> Option<&Arc<FlowNodeWrapper>> {
    self.parents.first()
  }

  pub fn cause_of_failure(&self) -> Option<&str> {
    self.cause_of_failure.as_deref()
  }

  pub fn set_cause_of_failure(&mut self, cause: impl Into<String>) {
    self.cause_of_failure = Some(cause.into());
  }

  /// Attaches the error of the enclosing block. From now on [Self::status]
  /// derives from it.
  pub fn set_block_error(&mut self, action: ErrorAction) {
    if let Some(previous) = &self.block_error {
      debug!(
        id = self.id(),
        previous = %previous.error,
        next = %action.error,
        "replacing block error"
      );
    }
    self.block_error = Some(action);
  }

  pub fn has_block_error(&self) -> bool {
    self.block_error.is_some()
  }

  /// Message of the block error, if any.
  pub fn block_error(&self) -> Option<String> {
    self.block_error.as_ref().map(ErrorAction::message)
  }

  pub fn is_block_error_interrupted_with_abort(&self) -> bool {
    self
      .block_error
      .as_ref()
      .is_some_and(|action| action.error.is_interrupted_with_abort())
  }

  /// Message of the error recorded on the node itself, if any.
  pub fn node_error(&self) -> Option<String> {
    self.node.error().map(ErrorAction::message)
  }

  pub fn is_loggable(&self) -> bool {
    self.loggability.is_loggable(self.node.as_ref())
  }
}

impl PartialEq for FlowNodeWrapper {
  fn eq(&self, other: &Self) -> bool {
    self.node.id() == other.node.id()
  }
}

impl Eq for FlowNodeWrapper {}

impl Hash for FlowNodeWrapper {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.node.id().hash(state);
  }
}

impl fmt::Debug for FlowNodeWrapper {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FlowNodeWrapper")
      .field("id", &self.id())
      .field("type", &self.node_type)
      .field("display_name", &self.display_name)
      .field("status", &self.status())
      .field("edges", &self.edges)
      .field(
        "parents",
        &self.parents.iter().map(|p| p.id()).collect::<Vec<_>>(),
      )
      .finish_non_exhaustive()
  }
}
