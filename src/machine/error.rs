//! Errors reported by the engine.
//!
//! None of these are fatal. The machine logs the rejection and stays in its
//! previous configuration; the `Err` lets callers react if they care.

use crate::core::StateId;
use thiserror::Error;

/// Why `add_state` refused a registration.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("State id {0} is reserved")]
    ReservedId(StateId),

    #[error("State id {0} is already registered")]
    DuplicateId(StateId),
}

/// Why a switch request was ignored.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SwitchError {
    #[error("State {0} is already active")]
    AlreadyActive(StateId),

    #[error("State id {0} is reserved and cannot be switched to")]
    Reserved(StateId),

    #[error("State {0} is not registered")]
    UnknownState(StateId),

    #[error("Machine is in its final state")]
    Finalized,

    #[error("No previous state to return to")]
    NoLastState,
}
