//! Diagnostic snapshot of what the machine is executing.

use crate::core::{Phase, StateId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecInfo {
    pub state_id: StateId,
    /// `None` before the first transition commits
    pub state_name: Option<String>,
    pub phase: Phase,
    pub transitioning: bool,
}

impl fmt::Display for ExecInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.state_name.as_deref().unwrap_or("<none>");
        write!(f, "CurrentState: {name} Method: {}", self.phase)
    }
}
