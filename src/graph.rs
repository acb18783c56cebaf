//! Assembling wrapped nodes into a published, read-only pipeline graph.
//!
//! The walker owns every [FlowNodeWrapper] through a [PipelineGraphBuilder]
//! while it is still discovering edges, parents and block errors. Once the
//! walk is done, [PipelineGraphBuilder::publish] freezes the wrappers into
//! `Arc`s in discovery order; after that nothing can mutate them, so the
//! resulting [PipelineGraph] can be shared between readers freely.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, trace};

use crate::container::StateContainer;
use crate::error::GraphError;
use crate::node_wrapper::FlowNodeWrapper;
use crate::types::NodeType;

/// Mutable graph under construction.
#[derive(Debug, Default)]
pub struct PipelineGraphBuilder {
  /// Wrappers in discovery order.
  nodes: Vec<FlowNodeWrapper>,
  index: HashMap<String, usize>,
  /// child id -> parent ids, in the order they were connected.
  parent_links: HashMap<String, Vec<String>>,
}

impl PipelineGraphBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a wrapper. Each raw node may be wrapped only once.
  pub fn insert(&mut self, wrapper: FlowNodeWrapper) -> Result<(), GraphError> {
    let id = wrapper.id().to_string();
    if self.index.contains_key(&id) {
      return Err(GraphError::DuplicateNode(id));
    }
    trace!(id = %id, node_type = %wrapper.node_type(), "inserting node");
    self.index.insert(id, self.nodes.len());
    self.nodes.push(wrapper);
    Ok(())
  }

  pub fn contains(&self, id: &str) -> bool {
    self.index.contains_key(id)
  }

  pub fn get_mut(&mut self, id: &str) -> Option<&mut FlowNodeWrapper> {
    let i = *self.index.get(id)?;
    self.nodes.get_mut(i)
  }

  /// Records `child` as an edge of `parent` and `parent` as a parent of `child`.
  pub fn connect(&mut self, parent_id: &str, child_id: &str) -> Result<(), GraphError> {
    if !self.contains(child_id) {
      return Err(GraphError::UnknownNode(child_id.to_string()));
    }
    let parent = self
      .get_mut(parent_id)
      .ok_or_else(|| GraphError::UnknownNode(parent_id.to_string()))?;
    parent.add_edge(child_id);
    self
      .parent_links
      .entry(child_id.to_string())
      .or_default()
      .push(parent_id.to_string());
    Ok(())
  }

  /// Freezes all wrappers. Parents must have been inserted before their children.
  #[instrument(level = "trace", skip(self))]
  pub fn publish(mut self) -> Result<PipelineGraph, GraphError> {
    let mut published: Vec<Arc<FlowNodeWrapper>> = Vec::with_capacity(self.nodes.len());
    for mut wrapper in self.nodes {
      let parent_ids = self.parent_links.remove(wrapper.id()).unwrap_or_default();
      let parents = parent_ids
        .into_iter()
        .map(|parent| match self.index.get(&parent) {
          Some(&i) if i < published.len() => Ok(Arc::clone(&published[i])),
          _ => Err(GraphError::ParentAfterChild {
            parent,
            child: wrapper.id().to_string(),
          }),
        })
        .collect::<Result<Vec<_>, _>>()?;
      wrapper.add_parents(&parents);
      published.push(Arc::new(wrapper));
    }

    let graph = PipelineGraph {
      nodes: published,
      index: self.index,
    };
    info!(
      node_count = graph.len(),
      edge_count = graph.edge_count(),
      "published pipeline graph"
    );
    Ok(graph)
  }
}

/// Read-only pipeline graph.
#[derive(Debug, Clone)]
pub struct PipelineGraph {
  nodes: Vec<Arc<FlowNodeWrapper>>,
  index: HashMap<String, usize>,
}

impl PipelineGraph {
  /// Nodes in discovery order.
  pub fn nodes(&self) -> &[Arc<FlowNodeWrapper>] {
    &self.nodes
  }

  pub fn get(&self, id: &str) -> Option<&Arc<FlowNodeWrapper>> {
    self.index.get(id).and_then(|&i| self.nodes.get(i))
  }

  pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &Arc<FlowNodeWrapper>> {
    self
      .nodes
      .iter()
      .filter(move |n| n.node_type() == node_type)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn edge_count(&self) -> usize {
    self.nodes.iter().map(|n| n.edges().len()).sum()
  }
}

impl StateContainer for PipelineGraph {
  type Item = Arc<FlowNodeWrapper>;

  fn iter(&self) -> impl Iterator<Item = &Arc<FlowNodeWrapper>> {
    self.nodes.iter()
  }
}
