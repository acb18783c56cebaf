//! Value types of the pipeline node model.
//!
//! Everything here is plain data; the wrapper in [crate::node_wrapper] combines
//! these into a resolved presentation node.

mod error_action;
#[cfg(test)]
mod error_action_test;
mod input_step;
mod node_type;
mod run_status;
#[cfg(test)]
mod run_status_test;
mod timing_info;

pub use error_action::{ErrorAction, ErrorCause};
pub use input_step::InputStep;
pub use node_type::{NodeKind, NodeType, classify};
pub use run_status::{NodeRunStatus, ParseRunStateError, RunResult, RunState};
pub use timing_info::TimingInfo;
