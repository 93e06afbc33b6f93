//! Builder API for transition tables and state machines.
//!
//! Transition blocks answer "which state should come next?" from a set of
//! declared edges. They do not drive a machine themselves: the host (usually a
//! state's `update`) calls `build()` and feeds the answer to `switch_state`.
//!
//! Two selection policies share one declaration pipeline:
//!
//! - [`ConditionBlock`]: boolean conditions, first fully satisfied edge wins
//! - [`UtilityBlock`]: `f32` scores, highest mean wins, earliest on ties

pub mod block;
pub mod condition;
pub mod error;
pub mod machine;
pub mod macros;
pub mod source;
pub mod transition;

pub use block::{
    ConditionBlock, ConditionTable, TransitionBlock, TransitionTable, UtilityBlock, UtilityTable,
};
pub use condition::{Condition, Verdict};
pub use error::{BuildError, EmptyConditions};
pub use machine::StateMachineBuilder;
pub use source::StateSource;
pub use transition::{ConditionBuilder, FromBuilder, ToBuilder, Transition};
