//! Tickmind: a tick-driven finite state machine for game-style agents
//!
//! A [`StateMachine`] is bound to one owner value for its whole lifetime and is
//! advanced by the host calling [`tick`](StateMachine::tick) once per frame.
//! States can hold a transition open by returning `false` from `enter` or
//! `exit`, and an optional final state takes over whenever its trigger fires.
//!
//! # Core Concepts
//!
//! - **State**: `enter`/`update`/`exit` callbacks that receive the owner through a `Context`
//! - **StateMachine**: registration, switch requests and the per-tick transition procedure
//! - **Transition blocks**: declarative "what next?" tables, boolean or utility scored
//! - **Timer**: pausable phase timer over a pluggable `Clock`
//! - **Scoring**: weighted utilities and fuzzy sets that feed utility conditions
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickmind::builder::ConditionBlock;
//! use tickmind::core::FnState;
//! use tickmind::{state_ids, StateMachineBuilder};
//!
//! state_ids! {
//!     enum Mode {
//!         Patrol = 0,
//!         Combat = 1,
//!     }
//! }
//!
//! let enemy_close = Rc::new(Cell::new(false));
//! let sensed = Rc::clone(&enemy_close);
//! let table = ConditionBlock::begin(Cell::new(Mode::Patrol))
//!     .transitions()
//!     .from(Mode::Patrol)
//!     .to(Mode::Combat)
//!     .condition(move || sensed.get())
//!     .end()
//!     .finalize()
//!     .unwrap();
//!
//! let mut machine = StateMachineBuilder::new()
//!     .state(Mode::Patrol, FnState::<u32>::new("Patrol", |_| {}))
//!     .state(Mode::Combat, FnState::<u32>::new("Combat", |ctx| *ctx.owner_mut() += 1))
//!     .initial(Mode::Patrol)
//!     .build(0u32)
//!     .unwrap();
//!
//! machine.tick();
//! enemy_close.set(true);
//! if let Some(next) = table.build_for(&Mode::Patrol) {
//!     machine.switch_state(next).unwrap();
//! }
//! machine.tick();
//! machine.tick();
//!
//! assert_eq!(machine.current_state_name(), Some("Combat"));
//! assert_eq!(*machine.owner(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod scoring;

// Re-export commonly used types
pub use builder::{
    BuildError, ConditionBlock, StateMachineBuilder, StateSource, TransitionTable, UtilityBlock,
};
pub use core::{Context, FnState, Phase, State, StateHistory, StateId, StateTransition};
pub use machine::{ExecInfo, RegistrationError, StateMachine, SwitchError};
pub use scoring::{weighted_utility, ScoringError, Variable};
