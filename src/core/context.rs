//! Execution context lent to state callbacks.

use super::id::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which state operation the machine is currently running.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    Enter,
    #[default]
    Update,
    Exit,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Update => "Update",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Switch request recorded by a callback, applied once it returns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum SwitchRequest {
    To(StateId),
    Last,
}

/// Handle passed to `enter`, `update` and `exit`.
///
/// Gives the callback access to the machine's owner and the time spent in the
/// current phase, and lets it request a switch. Requests are not applied
/// while the callback runs; the machine validates and applies the last one
/// as soon as the callback returns.
pub struct Context<'a, O> {
    owner: &'a mut O,
    state: StateId,
    last: StateId,
    phase: Phase,
    elapsed: f64,
    request: Option<SwitchRequest>,
}

impl<'a, O> Context<'a, O> {
    pub(crate) fn new(
        owner: &'a mut O,
        state: StateId,
        last: StateId,
        phase: Phase,
        elapsed: f64,
    ) -> Self {
        Self {
            owner,
            state,
            last,
            phase,
            elapsed,
            request: None,
        }
    }

    pub fn owner(&self) -> &O {
        &*self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut *self.owner
    }

    /// Seconds spent in the current phase, sampled when the callback started.
    pub fn duration(&self) -> f64 {
        self.elapsed
    }

    /// Id of the state this callback belongs to.
    pub fn state_id(&self) -> StateId {
        self.state
    }

    pub fn last_state_id(&self) -> StateId {
        self.last
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn switch_state(&mut self, id: impl Into<StateId>) {
        self.request = Some(SwitchRequest::To(id.into()));
    }

    pub fn switch_to_last_state(&mut self) {
        self.request = Some(SwitchRequest::Last);
    }

    pub(crate) fn take_request(&mut self) -> Option<SwitchRequest> {
        self.request.take()
    }
}

impl<O> fmt::Debug for Context<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("last", &self.last)
            .field("phase", &self.phase)
            .field("elapsed", &self.elapsed)
            .field("request", &self.request)
            .finish()
    }
}
