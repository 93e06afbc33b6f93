//! Building blocks shared by the engine and the builders.
//!
//! - `StateId` and its reserved sentinels
//! - The `State` capability, closure-backed `FnState` and the callback `Context`
//! - `Timer` over a pluggable `Clock`
//! - Bounded transition history

mod clock;
mod context;
mod history;
mod id;
mod state;
mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use context::{Context, Phase};
pub(crate) use context::SwitchRequest;
pub use history::{StateHistory, StateTransition};
pub use id::StateId;
pub use state::{FnState, State};
pub use timer::{Timer, TimerEvent};
