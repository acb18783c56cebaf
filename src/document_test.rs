//! Tests for walking and rendering recorded graph documents.

use std::io::Write;

use crate::container::StateContainer;
use crate::document::{GraphDocument, GraphView, load_document, parse_document};
use crate::engine::EngineContext;
use crate::error::{DocumentError, GraphError};
use crate::types::{NodeRunStatus, NodeType, RunResult, RunState};

const DECLARATIVE: &str = include_str!("../tests/integration/declarative.json");

fn declarative() -> GraphDocument {
  parse_document(DECLARATIVE).unwrap()
}

#[test]
fn walk_skips_markers_and_plain_blocks() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  let ids: Vec<&str> = g.nodes().iter().map(|n| n.id()).collect();
  assert_eq!(ids, ["3", "4", "5", "7", "9", "10", "11", "12", "13", "15"]);
  assert_eq!(g.edge_count(), 10);
}

#[test]
fn walk_classifies_nodes() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  assert_eq!(g.get("4").unwrap().node_type(), NodeType::Stage);
  assert_eq!(g.get("9").unwrap().node_type(), NodeType::Parallel);
  assert_eq!(g.get("5").unwrap().node_type(), NodeType::Step);
  assert_eq!(g.get("3").unwrap().node_type(), NodeType::Step);
  assert_eq!(g.get("4").unwrap().display_name(), "Build");
  assert_eq!(g.get("9").unwrap().display_name(), "unit");
}

#[test]
fn walk_resolves_allocation_nodes() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  let done = g.get("3").unwrap();
  assert_eq!(done.status(), NodeRunStatus::finished_success());
  assert_eq!(done.description(), Some("Allocate node : Start"));
  let waiting = g.get("13").unwrap();
  assert_eq!(waiting.status(), NodeRunStatus::queued());
  assert_eq!(
    waiting.description(),
    Some("Waiting for next available executor on 'linux'")
  );
}

#[test]
fn walk_applies_block_errors() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  let lint = g.get("10").unwrap();
  assert_eq!(lint.status(), NodeRunStatus::finished_failure());
  assert_eq!(lint.cause_of_failure(), Some("2 lint errors"));
  let clippy = g.get("11").unwrap();
  assert_eq!(clippy.status(), NodeRunStatus::finished_failure());
  assert_eq!(
    clippy.node_error().as_deref(),
    Some("script returned exit code 1")
  );
  let deploy = g.get("12").unwrap();
  assert_eq!(deploy.status(), NodeRunStatus::finished_aborted());
  assert_eq!(
    deploy.base_status(),
    NodeRunStatus::new(RunResult::Unknown, RunState::Running)
  );
}

#[test]
fn walk_links_parents() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  assert_eq!(g.get("7").unwrap().edges(), ["9", "10"]);
  let deploy = g.get("12").unwrap();
  assert_eq!(deploy.first_parent().map(|p| p.id()), Some("9"));
  assert_eq!(deploy.parents().len(), 2);
  assert!(g.get("3").unwrap().first_parent().is_none());
}

#[test]
fn walk_answers_any() {
  let g = declarative().walk(&EngineContext::default()).unwrap();
  assert!(g.any(RunState::Queued));
  assert!(g.any(RunState::Paused));
  assert!(!g.any(RunState::Running));
}

#[test]
fn executor_step_override() {
  let mut doc = declarative();
  doc.executor_step = Some("agent".to_string());
  let g = doc.walk(&EngineContext::default()).unwrap();
  assert!(g.get("3").is_none());
  assert!(g.get("13").is_none());
  assert!(g.get("4").unwrap().parents().is_empty());
  assert_eq!(g.edge_count(), 8);
}

#[test]
fn parents_pass_through_skipped_blocks() {
  let doc = parse_document(
    r#"{"run":{"pipeline":"p","id":"1"},"nodes":[
      {"id":"3","kind":{"step_start":{"step":"stage"}},"stage":true,"label":"Build","displayName":"Stage : Start"},
      {"id":"4","kind":{"step_start":{"step":"timeout"}},"displayName":"Timeout : Start","parents":["3"]},
      {"id":"5","kind":{"step_start":{"step":"withEnv"}},"displayName":"withEnv : Start","parents":["4"]},
      {"id":"6","kind":"atom","displayName":"Shell Script","parents":["5"]}
    ]}"#,
  )
  .unwrap();
  let g = doc.walk(&EngineContext::default()).unwrap();
  assert_eq!(g.len(), 2);
  assert_eq!(g.get("3").unwrap().edges(), ["6"]);
  assert_eq!(
    g.get("6").unwrap().first_parent().map(|p| p.id()),
    Some("3")
  );
}

#[test]
fn walk_rejects_unknown_parent() {
  let doc = parse_document(
    r#"{"run":{"pipeline":"p","id":"1"},"nodes":[
      {"id":"5","kind":"atom","displayName":"Echo","parents":["2"]}
    ]}"#,
  )
  .unwrap();
  let err = doc.walk(&EngineContext::default()).unwrap_err();
  assert!(matches!(
    err,
    DocumentError::Graph(GraphError::UnknownNode(ref id)) if id == "2"
  ));
}

#[test]
fn walk_rejects_duplicate_node() {
  let doc = parse_document(
    r#"{"run":{"pipeline":"p","id":"1"},"nodes":[
      {"id":"5","kind":"atom","displayName":"Echo"},
      {"id":"5","kind":"atom","displayName":"Echo"}
    ]}"#,
  )
  .unwrap();
  assert!(matches!(
    doc.walk(&EngineContext::default()),
    Err(DocumentError::Graph(GraphError::DuplicateNode(_)))
  ));
}

#[test]
fn missing_status_defaults_to_running() {
  let doc = parse_document(
    r#"{"run":{"pipeline":"p","id":"1"},"nodes":[
      {"id":"5","kind":"atom","displayName":"Echo"}
    ]}"#,
  )
  .unwrap();
  let g = doc.walk(&EngineContext::default()).unwrap();
  assert!(g.any(RunState::Running));
}

#[test]
fn parse_rejects_bad_json() {
  assert!(matches!(
    parse_document("{ not json"),
    Err(DocumentError::Json(_))
  ));
}

#[test]
fn load_from_file() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(DECLARATIVE.as_bytes()).unwrap();
  let doc = load_document(file.path()).unwrap();
  assert_eq!(doc.run.id, "57");
  assert_eq!(doc.nodes.len(), 14);
}

#[test]
fn load_missing_file_returns_error() {
  let dir = tempfile::tempdir().unwrap();
  let r = load_document(&dir.path().join("nonexistent.json"));
  assert!(matches!(r, Err(DocumentError::Io(_))));
}

#[test]
fn view_serializes_presentation_fields() {
  let doc = declarative();
  let g = doc.walk(&EngineContext::default()).unwrap();
  let view = GraphView::new(&doc.run, &g);
  let json = serde_json::to_value(&view).unwrap();
  assert_eq!(json["pipeline"], "acme/api/main");
  assert_eq!(json["run"], "57");
  let nodes = json["nodes"].as_array().unwrap();
  assert_eq!(nodes.len(), 10);

  let build = &nodes[1];
  assert_eq!(build["id"], "4");
  assert_eq!(build["type"], "STAGE");
  assert_eq!(build["displayName"], "Build");
  assert_eq!(build["result"], "SUCCESS");
  assert_eq!(build["state"], "FINISHED");
  assert_eq!(build["timing"]["totalDurationMillis"], 42000);
  assert_eq!(build["edges"], serde_json::json!(["5", "7"]));
  assert_eq!(build["firstParent"], "3");

  let make = &nodes[2];
  assert_eq!(make["description"], "make build");
  assert_eq!(make["loggable"], true);

  let deploy = &nodes[7];
  assert_eq!(deploy["result"], "ABORTED");
  assert_eq!(deploy["blockError"], "interrupted with result ABORTED");

  let input = &nodes[9];
  assert_eq!(input["state"], "PAUSED");
  assert_eq!(input["input"]["message"], "Deploy to production?");
}
