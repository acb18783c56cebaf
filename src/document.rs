//! Recorded graph documents (JSON): raw nodes of one run, walked into a
//! [PipelineGraph] and rendered back out as a presentation view.
//!
//! A document lists nodes in execution order. Each entry carries the raw node
//! plus what the engine observed about it (status, timing, pending input,
//! blockage cause) and what the walker learned from the surrounding structure
//! (block error, cause of failure, parent ids).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::engine::{BlockageResolver, EngineContext, FlowNode, PipelineRun};
use crate::error::{BlockageError, DocumentError, GraphError};
use crate::graph::{PipelineGraph, PipelineGraphBuilder};
use crate::node_wrapper::FlowNodeWrapper;
use crate::types::{
  ErrorAction, InputStep, NodeKind, NodeRunStatus, NodeType, RunResult, RunState, TimingInfo,
};

/// A raw node as recorded in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedNode {
  pub id: String,
  pub kind: NodeKind,
  pub display_name: String,
  #[serde(default)]
  pub label: Option<String>,
  #[serde(default)]
  pub stage: bool,
  #[serde(default)]
  pub parallel_branch: bool,
  #[serde(default)]
  pub error: Option<ErrorAction>,
  #[serde(default)]
  pub arguments: Option<String>,
  #[serde(default)]
  pub has_log: bool,
}

impl RecordedNode {
  pub fn new(id: impl Into<String>, kind: NodeKind, display_name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      kind,
      display_name: display_name.into(),
      label: None,
      stage: false,
      parallel_branch: false,
      error: None,
      arguments: None,
      has_log: false,
    }
  }
}

impl FlowNode for RecordedNode {
  fn id(&self) -> &str {
    &self.id
  }

  fn kind(&self) -> &NodeKind {
    &self.kind
  }

  fn is_stage(&self) -> bool {
    self.stage
  }

  fn is_parallel_branch(&self) -> bool {
    self.parallel_branch
  }

  fn display_name(&self) -> &str {
    &self.display_name
  }

  fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }

  fn error(&self) -> Option<&ErrorAction> {
    self.error.as_ref()
  }

  fn step_arguments(&self) -> Option<String> {
    self.arguments.clone()
  }

  fn has_log(&self) -> bool {
    self.has_log
  }
}

/// The run a document was recorded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRun {
  pub pipeline: String,
  pub id: String,
}

impl RecordedRun {
  pub fn new(pipeline: impl Into<String>, id: impl Into<String>) -> Self {
    Self {
      pipeline: pipeline.into(),
      id: id.into(),
    }
  }
}

impl PipelineRun for RecordedRun {
  fn id(&self) -> &str {
    &self.id
  }

  fn pipeline(&self) -> &str {
    &self.pipeline
  }
}

/// Blockage causes recorded per node id.
#[derive(Debug, Clone, Default)]
pub struct RecordedBlockage {
  causes: HashMap<String, String>,
}

impl BlockageResolver for RecordedBlockage {
  fn cause_of_blockage(
    &self,
    node: &dyn FlowNode,
    _run: &dyn PipelineRun,
  ) -> Result<Option<String>, BlockageError> {
    Ok(self.causes.get(node.id()).cloned())
  }
}

fn default_status() -> NodeRunStatus {
  NodeRunStatus::new(RunResult::Unknown, RunState::Running)
}

/// One document entry: a raw node and what is known about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
  #[serde(flatten)]
  pub node: RecordedNode,
  #[serde(default = "default_status")]
  pub status: NodeRunStatus,
  #[serde(default)]
  pub timing: TimingInfo,
  #[serde(default)]
  pub input: Option<InputStep>,
  #[serde(default)]
  pub block_error: Option<ErrorAction>,
  #[serde(default)]
  pub cause_of_failure: Option<String>,
  #[serde(default)]
  pub blockage: Option<String>,
  #[serde(default)]
  pub parents: Vec<String>,
}

/// A recorded run and its raw nodes in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
  pub run: RecordedRun,
  /// Overrides the executor-allocation step kind for this document.
  #[serde(default)]
  pub executor_step: Option<String>,
  pub nodes: Vec<NodeRecord>,
}

impl GraphDocument {
  /// Walks the document into a published graph.
  ///
  /// Executor-allocation blocks go through [FlowNodeWrapper::node_allocation]
  /// with the recorded blockage causes; stages, parallel branches and atoms
  /// are wrapped normally; block ends, flow markers and other blocks are
  /// skipped. A parent that was skipped is replaced by its own parents.
  /// Parents must be listed before their children.
  #[instrument(level = "trace", skip_all, fields(run = %self.run.id))]
  pub fn walk(&self, ctx: &EngineContext) -> Result<PipelineGraph, DocumentError> {
    let blockage = RecordedBlockage {
      causes: self
        .nodes
        .iter()
        .filter_map(|r| r.blockage.clone().map(|c| (r.node.id.clone(), c)))
        .collect(),
    };
    let mut ctx = ctx.clone().with_blockage(Arc::new(blockage));
    if let Some(step) = &self.executor_step {
      ctx = ctx.with_executor_step(step.clone());
    }
    let run: Arc<dyn PipelineRun> = Arc::new(self.run.clone());

    let mut builder = PipelineGraphBuilder::new();
    // skipped node id -> the wrapped ancestors it stands for
    let mut skipped: HashMap<&str, Vec<String>> = HashMap::new();
    for record in &self.nodes {
      let parents: Vec<String> = record
        .parents
        .iter()
        .flat_map(|p| match skipped.get(p.as_str()) {
          Some(through) => through.clone(),
          None => vec![p.clone()],
        })
        .collect();
      let node: Arc<dyn FlowNode> = Arc::new(record.node.clone());
      let structural = record.node.stage || record.node.parallel_branch;
      let wrapper = match &record.node.kind {
        NodeKind::StepStart { step } if *step == ctx.executor_step => {
          FlowNodeWrapper::node_allocation(node, Arc::clone(&run), &ctx)
        }
        NodeKind::StepStart { .. } if !structural => None,
        NodeKind::Atom | NodeKind::StepStart { .. } => Some(
          FlowNodeWrapper::with_input(
            node,
            record.status,
            record.timing.clone(),
            record.input.clone(),
            Arc::clone(&run),
            &ctx,
          )
          .map_err(GraphError::from)?,
        ),
        NodeKind::BlockEnd | NodeKind::FlowStart | NodeKind::FlowEnd => None,
      };
      let Some(mut wrapper) = wrapper else {
        trace!(id = %record.node.id, kind = %record.node.kind, "skipping node");
        skipped.insert(record.node.id.as_str(), parents);
        continue;
      };

      if let Some(action) = &record.block_error {
        wrapper.set_block_error(action.clone());
      }
      if let Some(cause) = &record.cause_of_failure {
        wrapper.set_cause_of_failure(cause.clone());
      }
      builder.insert(wrapper)?;
      for parent in &parents {
        builder.connect(parent, &record.node.id)?;
      }
    }
    Ok(builder.publish()?)
  }
}

/// Parses a document from JSON text.
pub fn parse_document(json: &str) -> Result<GraphDocument, DocumentError> {
  Ok(serde_json::from_str(json)?)
}

/// Loads a document from `path`.
#[instrument(level = "trace", skip(path))]
pub fn load_document(path: &Path) -> Result<GraphDocument, DocumentError> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Presentation view of one node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
  pub id: String,
  pub display_name: String,
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub node_type: NodeType,
  pub result: RunResult,
  pub state: RunState,
  pub timing: TimingInfo,
  pub edges: Vec<String>,
  pub first_parent: Option<String>,
  pub cause_of_failure: Option<String>,
  pub block_error: Option<String>,
  pub node_error: Option<String>,
  pub input: Option<InputStep>,
  pub loggable: bool,
}

impl From<&FlowNodeWrapper> for NodeView {
  fn from(w: &FlowNodeWrapper) -> Self {
    let status = w.status();
    Self {
      id: w.id().to_string(),
      display_name: w.display_name().to_string(),
      description: w.description().map(str::to_string),
      node_type: w.node_type(),
      result: status.result,
      state: status.state,
      timing: w.timing().clone(),
      edges: w.edges().to_vec(),
      first_parent: w.first_parent().map(|p| p.id().to_string()),
      cause_of_failure: w.cause_of_failure().map(str::to_string),
      block_error: w.block_error(),
      node_error: w.node_error(),
      input: w.input_step().cloned(),
      loggable: w.is_loggable(),
    }
  }
}

/// Presentation view of a whole graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
  pub pipeline: String,
  pub run: String,
  pub nodes: Vec<NodeView>,
}

impl GraphView {
  pub fn new(run: &dyn PipelineRun, graph: &PipelineGraph) -> Self {
    Self {
      pipeline: run.pipeline().to_string(),
      run: run.id().to_string(),
      nodes: graph.nodes().iter().map(|n| NodeView::from(n.as_ref())).collect(),
    }
  }
}
