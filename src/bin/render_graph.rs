//! CLI: Render the presentation graph of a recorded pipeline run.
//!
//! Reads a recorded graph document (JSON), walks it into a pipeline graph and
//! prints the resolved nodes (type, status, description, edges) as JSON.
//!
//! Usage: `render_graph [OPTIONS] <path-to-document>`
//! Example: render_graph --pretty --any QUEUED tests/integration/declarative.json
//!
//! With `--any <STATE>` the exit code is 0 when some node is in that state and 2
//! when none is.
//!
//! Set RUST_LOG=pipeline_node_graph=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use pipeline_node_graph::{
  EngineContext, GraphView, RunState, StateContainer, load_document,
};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Render the presentation graph of a recorded pipeline run.
#[derive(Parser, Debug)]
#[command(name = "render_graph")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  PIPELINE_GRAPH_PRETTY          Pretty-print the JSON output when set to 1 or true.
  PIPELINE_GRAPH_EXECUTOR_STEP   Step kind treated as executor allocation (default: node).

Examples:
  render_graph tests/integration/declarative.json
  render_graph --any QUEUED tests/integration/declarative.json"#
)]
struct Args {
  /// Pretty-print the JSON output. Overridden by PIPELINE_GRAPH_PRETTY if set.
  #[arg(long)]
  pretty: bool,

  /// Step kind treated as executor allocation. Overridden by PIPELINE_GRAPH_EXECUTOR_STEP if set.
  #[arg(long, value_name = "STEP")]
  executor_step: Option<String>,

  /// Only report whether any node is in this state (QUEUED, RUNNING, PAUSED, ...).
  #[arg(long, value_name = "STATE")]
  any: Option<RunState>,

  /// Path to the recorded graph document
  #[arg(value_name = "path-to-document")]
  document: PathBuf,
}

fn env_flag(name: &str) -> Option<bool> {
  env::var(name)
    .ok()
    .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env vars override flags.
  let pretty = env_flag("PIPELINE_GRAPH_PRETTY").unwrap_or(args.pretty);
  let executor_step = env::var("PIPELINE_GRAPH_EXECUTOR_STEP")
    .ok()
    .or_else(|| args.executor_step.clone());
  info!(pretty, executor_step = ?executor_step, document = %args.document.display(), "options (env or flags)");

  let doc = match load_document(&args.document) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Error loading {}: {}", args.document.display(), e);
      process::exit(1);
    }
  };

  let mut ctx = EngineContext::default();
  if let Some(step) = executor_step {
    ctx = ctx.with_executor_step(step);
  }

  let graph = match doc.walk(&ctx) {
    Ok(g) => g,
    Err(e) => {
      eprintln!("Error building graph: {}", e);
      process::exit(1);
    }
  };
  info!(nodes = graph.len(), edges = graph.edge_count(), "graph built");

  if let Some(state) = args.any {
    let found = graph.any(state);
    println!("{}", found);
    process::exit(if found { 0 } else { 2 });
  }

  let view = GraphView::new(&doc.run, &graph);
  let out = if pretty {
    serde_json::to_string_pretty(&view)
  } else {
    serde_json::to_string(&view)
  };
  match out {
    Ok(json) => println!("{}", json),
    Err(e) => {
      eprintln!("Error rendering graph: {}", e);
      process::exit(1);
    }
  }
}
