//! Collections of status-bearing items and the "is anything in state S" query.

use std::sync::Arc;

use crate::node_wrapper::FlowNodeWrapper;
use crate::types::{NodeRunStatus, RunState};

/// Anything with a lifecycle state.
pub trait StateBearing {
  fn state(&self) -> RunState;
}

impl StateBearing for RunState {
  fn state(&self) -> RunState {
    *self
  }
}

impl StateBearing for NodeRunStatus {
  fn state(&self) -> RunState {
    self.state
  }
}

impl StateBearing for FlowNodeWrapper {
  fn state(&self) -> RunState {
    self.status().state
  }
}

impl<T: StateBearing + ?Sized> StateBearing for &T {
  fn state(&self) -> RunState {
    (**self).state()
  }
}

impl<T: StateBearing + ?Sized> StateBearing for Arc<T> {
  fn state(&self) -> RunState {
    (**self).state()
  }
}

/// True as soon as one item is in `state`. Stops at the first match, so
/// `items` may be lazy or unbounded.
pub fn any_in_state<I>(items: I, state: RunState) -> bool
where
  I: IntoIterator,
  I::Item: StateBearing,
{
  items.into_iter().any(|item| item.state() == state)
}

/// An ordered collection of status-bearing items.
pub trait StateContainer {
  type Item: StateBearing;

  fn iter(&self) -> impl Iterator<Item = &Self::Item>;

  /// Whether at least one item is in `state`.
  fn any(&self, state: RunState) -> bool {
    any_in_state(self.iter(), state)
  }
}

/// Vec-backed [StateContainer] of steps, in the order they were added.
#[derive(Debug, Clone)]
pub struct StepContainer<T> {
  items: Vec<T>,
}

impl<T> StepContainer<T> {
  pub fn new() -> Self {
    Self { items: Vec::new() }
  }

  pub fn push(&mut self, item: T) {
    self.items.push(item);
  }

  pub fn get(&self, index: usize) -> Option<&T> {
    self.items.get(index)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// At most `limit` items starting at `start`.
  pub fn page(&self, start: usize, limit: usize) -> impl Iterator<Item = &T> {
    self.items.iter().skip(start).take(limit)
  }
}

impl<T> Default for StepContainer<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> FromIterator<T> for StepContainer<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self {
      items: iter.into_iter().collect(),
    }
  }
}

impl<T: StateBearing> StateContainer for StepContainer<T> {
  type Item = T;

  fn iter(&self) -> impl Iterator<Item = &T> {
    self.items.iter()
  }
}
