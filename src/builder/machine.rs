//! Builder for configuring state machines.

use crate::builder::error::BuildError;
use crate::core::{Clock, State, StateHistory, StateId};
use crate::machine::{RegistrationError, StateMachine, Trigger};
use std::rc::Rc;

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::add_state`], which logs and skips bad registrations,
/// the builder refuses to produce a machine from an inconsistent configuration.
///
/// # Example
///
/// ```rust
/// use tickmind::builder::StateMachineBuilder;
/// use tickmind::core::{FnState, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut machine = StateMachineBuilder::new()
///     .state(0, FnState::<u32>::new("Idle", |ctx| *ctx.owner_mut() += 1))
///     .final_state(FnState::<u32>::new("Dead", |_| {}), |hits: &u32| *hits >= 3)
///     .initial(0)
///     .clock(clock)
///     .build(0u32)
///     .unwrap();
///
/// for _ in 0..5 {
///     machine.tick();
/// }
/// assert!(machine.is_in_final());
/// ```
pub struct StateMachineBuilder<O> {
    states: Vec<(StateId, Box<dyn State<O>>)>,
    final_state: Option<(Box<dyn State<O>>, Trigger<O>)>,
    initial: Option<StateId>,
    clock: Option<Rc<dyn Clock>>,
    history_capacity: usize,
}

impl<O> StateMachineBuilder<O> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            final_state: None,
            initial: None,
            clock: None,
            history_capacity: StateHistory::DEFAULT_CAPACITY,
        }
    }

    /// Register a state under `id`.
    pub fn state<S>(mut self, id: impl Into<StateId>, state: S) -> Self
    where
        S: State<O> + 'static,
    {
        self.states.push((id.into(), Box::new(state)));
        self
    }

    /// Register the final state. A later call replaces an earlier one.
    pub fn final_state<S, F>(mut self, state: S, trigger: F) -> Self
    where
        S: State<O> + 'static,
        F: Fn(&O) -> bool + 'static,
    {
        self.final_state = Some((Box::new(state), Box::new(trigger)));
        self
    }

    /// State the first `tick()` enters.
    pub fn initial(mut self, id: impl Into<StateId>) -> Self {
        self.initial = Some(id.into());
        self
    }

    pub fn clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Some(Rc::new(clock));
        self
    }

    /// Number of completed transitions kept in the history. Zero disables it.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the state machine around `owner`.
    pub fn build(self, owner: O) -> Result<StateMachine<O>, BuildError> {
        let mut machine = match self.clock {
            Some(clock) => StateMachine::with_clock(owner, clock),
            None => StateMachine::new(owner),
        };
        machine.set_history_capacity(self.history_capacity);

        for (id, state) in self.states {
            machine
                .add_boxed_state(id, state)
                .map_err(|err| match err {
                    RegistrationError::ReservedId(id) => BuildError::ReservedStateId(id),
                    RegistrationError::DuplicateId(id) => BuildError::DuplicateStateId(id),
                })?;
        }

        if let Some((state, trigger)) = self.final_state {
            machine.add_boxed_final_state(state, trigger);
        }

        if let Some(initial) = self.initial {
            if initial.is_reserved() {
                return Err(BuildError::ReservedStateId(initial));
            }
            machine
                .switch_state(initial)
                .map_err(|_| BuildError::UnknownInitialState(initial))?;
        }

        Ok(machine)
    }
}

impl<O> Default for StateMachineBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}
