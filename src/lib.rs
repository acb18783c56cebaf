//! # pipeline-node-graph
//!
//! Presentation model for pipeline execution graphs.
//!
//! A workflow engine records a run as a graph of raw execution nodes. This
//! crate turns each raw node into a [FlowNodeWrapper] with a presentation
//! type (stage, parallel branch, step), a resolved run status, timing,
//! display text and parent/child links, ready for a renderer.
//!
//! ## Architecture
//!
//! - [engine]: traits the engine implements ([FlowNode], [PipelineRun]) and
//!   the collaborators injected into construction ([EngineContext]).
//! - [types]: plain values: run status, node kind and type, errors, timing.
//! - [node_wrapper]: classification, status resolution, graph links.
//! - [graph]: wrap-once builder and the published, read-only graph.
//! - [container]: the "is any item in state S" query.
//! - [document]: JSON-recorded runs, walked into a graph and rendered as a view.

pub mod container;
pub mod document;
#[cfg(test)]
mod document_test;
pub mod engine;
pub mod error;
pub mod graph;
pub mod node_wrapper;
pub mod types;

pub use container::{StateBearing, StateContainer, StepContainer, any_in_state};
pub use document::{GraphDocument, GraphView, NodeView, load_document, parse_document};
pub use engine::{EngineContext, FlowNode, PipelineRun};
pub use error::{BlockageError, ClassificationError, DocumentError, GraphError};
pub use graph::{PipelineGraph, PipelineGraphBuilder};
pub use node_wrapper::FlowNodeWrapper;
pub use types::{NodeRunStatus, NodeType, RunResult, RunState, classify};
