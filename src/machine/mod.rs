//! The state machine engine.
//!
//! The engine owns the registered states and drives them one tick at a time:
//!
//! - `update` runs on the active state while nothing is pending
//! - a switch request arms a transition, which runs `exit`, commits, then runs
//!   `enter`, retrying whichever of them returns `false` on later ticks
//! - a final state, if registered, takes over whenever its trigger fires
//!
//! Misconfiguration never panics: rejected calls are logged through `tracing`
//! and reported as `Err`, and the machine keeps its previous configuration.

mod engine;
mod error;
mod info;

pub(crate) use engine::Trigger;
pub use engine::StateMachine;
pub use error::{RegistrationError, SwitchError};
pub use info::ExecInfo;
