//! Bounded log of completed transitions.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of one completed transition.
///
/// `ticks` counts how many `tick()` calls the transition procedure took,
/// including ticks spent waiting on `exit` or `enter`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left (`INVALID` for the first transition)
    pub from: StateId,
    /// The state that was entered
    pub to: StateId,
    /// When `enter` returned `true`
    pub timestamp: DateTime<Utc>,
    pub ticks: usize,
}

/// Most recent transitions, oldest first.
///
/// Once `capacity` records are held, recording drops the oldest one. A
/// capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use tickmind::core::{StateHistory, StateTransition};
/// use tickmind::StateId;
///
/// let mut history = StateHistory::with_capacity(2);
/// for (from, to) in [(-1, 0), (0, 1), (1, 2)] {
///     history.record(StateTransition {
///         from: StateId::new(from),
///         to: StateId::new(to),
///         timestamp: Utc::now(),
///         ticks: 1,
///     });
/// }
///
/// let path: Vec<i32> = history.get_path().iter().map(|id| id.get()).collect();
/// assert_eq!(path, vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    capacity: usize,
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    pub const DEFAULT_CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed: the `from` of the oldest record, then every `to`.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and the newest record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}
