//! Build errors for transition blocks and state machines.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when finalizing a transition block or building a machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No transitions defined. Declare at least one edge before finalize()")]
    NoTransitions,

    #[error("Transitions declared without conditions: {}", list(.0))]
    EmptyConditions(Vec<EmptyConditions>),

    #[error("State id {0} is reserved")]
    ReservedStateId(StateId),

    #[error("State id {0} is declared more than once")]
    DuplicateStateId(StateId),

    #[error("Initial state {0} is not declared")]
    UnknownInitialState(StateId),
}

/// An edge whose condition list is empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{from} -> {to}")]
pub struct EmptyConditions {
    pub from: String,
    pub to: String,
}

fn list(edges: &[EmptyConditions]) -> String {
    edges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
