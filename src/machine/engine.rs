//! Tick-driven state machine engine.

#![warn(missing_docs)]

use super::error::{RegistrationError, SwitchError};
use super::info::ExecInfo;
use crate::core::{
    Clock, Context, MonotonicClock, Phase, State, StateHistory, StateId, StateTransition,
    SwitchRequest, Timer,
};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

pub(crate) type Trigger<O> = Box<dyn Fn(&O) -> bool>;

/// Where an in-flight transition currently is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Stage {
    Exit,
    Enter,
}

/// Finite state machine bound to one owner for its whole lifetime.
///
/// The host calls [`tick`](Self::tick) once per frame. A tick either runs the
/// active state's `update` or advances a pending transition by one step:
/// the old state's `exit`, the commit, then the new state's `enter`. When
/// `exit` or `enter` returns `false` the step stops and the same call is
/// retried on the next tick, so neither state's `update` runs until the
/// transition completes.
///
/// An optional final state is entered whenever its trigger returns `true`.
/// From then on ordinary switch requests are rejected until [`reset`](Self::reset).
///
/// # Example
///
/// ```rust
/// use tickmind::core::FnState;
/// use tickmind::{StateId, StateMachine};
///
/// const IDLE: StateId = StateId::new(0);
/// const PATROL: StateId = StateId::new(1);
///
/// let mut machine = StateMachine::new(0u32);
/// machine.add_state(IDLE, FnState::<u32>::new("Idle", |_| {})).unwrap();
/// machine
///     .add_state(PATROL, FnState::<u32>::new("Patrol", |ctx| *ctx.owner_mut() += 1))
///     .unwrap();
///
/// machine.switch_state(PATROL).unwrap();
/// machine.tick(); // enters Patrol
/// machine.tick(); // Patrol.update
///
/// assert_eq!(machine.current_state_id(), PATROL);
/// assert_eq!(*machine.owner(), 1);
/// ```
pub struct StateMachine<O> {
    id: Uuid,
    owner: O,
    states: HashMap<StateId, Box<dyn State<O>>>,
    current: StateId,
    next: StateId,
    last: StateId,
    final_trigger: Option<Trigger<O>>,
    pending: bool,
    stage: Option<Stage>,
    in_final: bool,
    transition_ticks: usize,
    timer: Timer,
    history: StateHistory,
}

impl<O> StateMachine<O> {
    /// Create a machine that measures phases with a [`MonotonicClock`].
    pub fn new(owner: O) -> Self {
        Self::with_clock(owner, Rc::new(MonotonicClock::new()))
    }

    /// Create a machine whose phase timer reads `clock`.
    pub fn with_clock(owner: O, clock: Rc<dyn Clock>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            states: HashMap::new(),
            current: StateId::INVALID,
            next: StateId::INVALID,
            last: StateId::INVALID,
            final_trigger: None,
            pending: false,
            stage: None,
            in_final: false,
            transition_ticks: 0,
            timer: Timer::with_clock(clock),
            history: StateHistory::new(),
        }
    }

    pub(crate) fn set_history_capacity(&mut self, capacity: usize) {
        self.history = StateHistory::with_capacity(capacity);
    }

    /// Identifier attached to every log event of this machine.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Shared access to the owner.
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Mutable access to the owner between ticks.
    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    /// Register a state under `id`.
    ///
    /// Reserved ids and ids already in use are rejected; an existing
    /// registration is never overwritten.
    pub fn add_state<S>(&mut self, id: impl Into<StateId>, state: S) -> Result<(), RegistrationError>
    where
        S: State<O> + 'static,
    {
        self.add_boxed_state(id.into(), Box::new(state))
    }

    /// Register an already boxed state. See [`add_state`](Self::add_state).
    pub fn add_boxed_state(
        &mut self,
        id: StateId,
        state: Box<dyn State<O>>,
    ) -> Result<(), RegistrationError> {
        if id.is_reserved() {
            warn!(machine = %self.id, state = %id, name = state.name(), "unable to add state: reserved id");
            return Err(RegistrationError::ReservedId(id));
        }
        if self.states.contains_key(&id) {
            warn!(machine = %self.id, state = %id, name = state.name(), "unable to add state: id already registered");
            return Err(RegistrationError::DuplicateId(id));
        }
        self.states.insert(id, state);
        Ok(())
    }

    /// Register the final state and the predicate that activates it.
    ///
    /// The trigger is evaluated against the owner at the start of every tick
    /// until it fires. Registering a second final state replaces the first.
    pub fn add_final_state<S, F>(&mut self, state: S, trigger: F)
    where
        S: State<O> + 'static,
        F: Fn(&O) -> bool + 'static,
    {
        self.add_boxed_final_state(Box::new(state), Box::new(trigger));
    }

    pub(crate) fn add_boxed_final_state(&mut self, state: Box<dyn State<O>>, trigger: Trigger<O>) {
        if self.final_trigger.is_some() {
            warn!(machine = %self.id, name = state.name(), "replacing previously registered final state");
        }
        self.states.insert(StateId::FINAL, state);
        self.final_trigger = Some(trigger);
    }

    /// Whether a final state and its trigger are registered.
    pub fn has_final_state(&self) -> bool {
        self.final_trigger.is_some()
    }

    /// Request a transition to `id`, carried out by subsequent ticks.
    ///
    /// A newer request replaces the target of one that has not committed yet.
    /// If the machine has already committed and is waiting on `enter`, the
    /// half-entered state is left again through its `exit`.
    pub fn switch_state(&mut self, id: impl Into<StateId>) -> Result<(), SwitchError> {
        let id = id.into();
        let rejection = if self.in_final {
            Some(SwitchError::Finalized)
        } else if id.is_reserved() {
            Some(SwitchError::Reserved(id))
        } else if id == self.current {
            Some(SwitchError::AlreadyActive(id))
        } else if !self.states.contains_key(&id) {
            Some(SwitchError::UnknownState(id))
        } else {
            None
        };

        if let Some(err) = rejection {
            warn!(machine = %self.id, state = %id, "switch request ignored: {err}");
            return Err(err);
        }

        if self.stage == Some(Stage::Enter) {
            self.stage = None;
        }
        self.next = id;
        self.pending = true;
        Ok(())
    }

    /// Return to the state that was active before the latest commit.
    pub fn switch_to_last_state(&mut self) -> Result<(), SwitchError> {
        if !self.last.is_valid() {
            warn!(machine = %self.id, "switch request ignored: no previous state");
            return Err(SwitchError::NoLastState);
        }
        self.switch_state(self.last)
    }

    /// Advance the machine by one step.
    pub fn tick(&mut self) {
        self.check_final_trigger();

        if self.pending {
            self.run_transition();
        } else if self.current.is_valid() {
            let current = self.current;
            self.invoke(current, Phase::Update, |state, ctx| state.update(ctx));
        }
    }

    /// Return to the uninitialized state, leaving the final state if active.
    ///
    /// Registered states, the final trigger and the history are kept.
    pub fn reset(&mut self) {
        debug!(machine = %self.id, state = %self.current, "machine reset");
        self.current = StateId::INVALID;
        self.next = StateId::INVALID;
        self.last = StateId::INVALID;
        self.pending = false;
        self.stage = None;
        self.in_final = false;
        self.transition_ticks = 0;
        self.timer.reset();
    }

    /// Seconds spent in the phase currently executing (exit, enter or update).
    pub fn duration(&self) -> f64 {
        self.timer.elapsed_seconds()
    }

    /// Which callback the next tick runs: `exit`, `enter` or `update`.
    pub fn phase(&self) -> Phase {
        match self.stage {
            Some(Stage::Exit) => Phase::Exit,
            Some(Stage::Enter) => Phase::Enter,
            None => Phase::Update,
        }
    }

    /// Snapshot of the current state, phase and transition flag.
    pub fn exec_info(&self) -> ExecInfo {
        ExecInfo {
            state_id: self.current,
            state_name: self.current_state_name().map(str::to_owned),
            phase: self.phase(),
            transitioning: self.pending,
        }
    }

    /// Active state, `INVALID` before the first commit.
    pub fn current_state_id(&self) -> StateId {
        self.current
    }

    /// Name of the active state, if one is registered under its id.
    pub fn current_state_name(&self) -> Option<&str> {
        self.states.get(&self.current).map(|state| state.name())
    }

    /// State left by the latest commit, `INVALID` if none.
    pub fn last_state_id(&self) -> StateId {
        self.last
    }

    /// Target of the pending transition, or `INVALID` if none was ever requested.
    pub fn next_state_id(&self) -> StateId {
        self.next
    }

    /// True from a switch request until the target's `enter` succeeds.
    pub fn is_transitioning(&self) -> bool {
        self.pending
    }

    /// True once the final trigger has fired, until [`reset`](Self::reset).
    pub fn is_in_final(&self) -> bool {
        self.in_final
    }

    /// Whether a state is registered under `id`.
    pub fn contains_state(&self, id: impl Into<StateId>) -> bool {
        self.states.contains_key(&id.into())
    }

    /// Number of registered states, including the final state.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Completed transitions, oldest first.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// The phase timer behind [`duration`](Self::duration).
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Mutable access to the phase timer, e.g. to pause it while the host is paused.
    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn check_final_trigger(&mut self) {
        if self.in_final {
            return;
        }
        let Some(trigger) = &self.final_trigger else {
            return;
        };
        if trigger(&self.owner) {
            debug!(machine = %self.id, from = %self.current, "final state triggered");
            self.in_final = true;
            self.next = StateId::FINAL;
            self.pending = true;
            if self.stage == Some(Stage::Enter) {
                self.stage = None;
            }
        }
    }

    fn run_transition(&mut self) {
        self.transition_ticks += 1;

        if self.stage.is_none() {
            self.stage = Some(Stage::Exit);
            self.timer.begin();
        }

        if self.stage == Some(Stage::Exit) {
            if self.next != StateId::FINAL && self.current.is_valid() {
                let current = self.current;
                let released = self
                    .invoke(current, Phase::Exit, |state, ctx| state.exit(ctx))
                    .unwrap_or(true);
                if !released {
                    trace!(machine = %self.id, state = %current, "exit gated, retrying next tick");
                    return;
                }
            }

            if self.next != self.current {
                self.last = self.current;
                self.current = self.next;
            }
            self.stage = Some(Stage::Enter);
            self.timer.begin();
        }

        let current = self.current;
        let entered = self
            .invoke(current, Phase::Enter, |state, ctx| state.enter(ctx))
            .unwrap_or(true);
        if !entered {
            trace!(machine = %self.id, state = %current, "enter gated, retrying next tick");
            return;
        }

        // A switch request issued from `enter` resets the stage; the new
        // transition starts on the next tick.
        let retargeted = self.stage != Some(Stage::Enter);
        self.complete_transition();
        if !retargeted {
            self.pending = false;
            self.stage = None;
        }
    }

    fn complete_transition(&mut self) {
        debug!(
            machine = %self.id,
            from = %self.last,
            to = %self.current,
            ticks = self.transition_ticks,
            "transition complete"
        );
        self.history.record(StateTransition {
            from: self.last,
            to: self.current,
            timestamp: Utc::now(),
            ticks: self.transition_ticks,
        });
        self.transition_ticks = 0;
        self.timer.begin();
    }

    /// Run one state callback with a fresh context, then apply its switch request.
    fn invoke<R>(
        &mut self,
        id: StateId,
        phase: Phase,
        call: impl FnOnce(&mut Box<dyn State<O>>, &mut Context<'_, O>) -> R,
    ) -> Option<R> {
        let elapsed = self.timer.elapsed_seconds();
        let state = self.states.get_mut(&id)?;
        let mut ctx = Context::new(&mut self.owner, id, self.last, phase, elapsed);
        let output = call(state, &mut ctx);

        if let Some(request) = ctx.take_request() {
            // Rejections are already logged by switch_state.
            let _ = match request {
                SwitchRequest::To(target) => self.switch_state(target),
                SwitchRequest::Last => self.switch_to_last_state(),
            };
        }
        Some(output)
    }
}

impl<O: fmt::Debug> fmt::Debug for StateMachine<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("states", &self.states.len())
            .field("current", &self.current)
            .field("next", &self.next)
            .field("last", &self.last)
            .field("pending", &self.pending)
            .field("phase", &self.phase())
            .field("in_final", &self.in_final)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FnState, ManualClock};
    use std::cell::{Cell, RefCell};

    const IDLE: StateId = StateId::new(0);
    const PATROL: StateId = StateId::new(1);
    const COMBAT: StateId = StateId::new(2);

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every call; `enter`/`exit` fail while their budget is non-zero.
    struct Recorder {
        name: &'static str,
        log: Log,
        enter_blocks: Cell<u32>,
        exit_blocks: Cell<u32>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                enter_blocks: Cell::new(0),
                exit_blocks: Cell::new(0),
            }
        }

        fn blocking_enter(self, ticks: u32) -> Self {
            self.enter_blocks.set(ticks);
            self
        }

        fn blocking_exit(self, ticks: u32) -> Self {
            self.exit_blocks.set(ticks);
            self
        }

        fn push(&self, call: &str) {
            self.log.borrow_mut().push(format!("{}.{call}", self.name));
        }
    }

    fn gate(blocks: &Cell<u32>) -> bool {
        match blocks.get() {
            0 => true,
            left => {
                blocks.set(left - 1);
                false
            }
        }
    }

    impl<O> State<O> for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn enter(&mut self, _ctx: &mut Context<'_, O>) -> bool {
            self.push("enter");
            gate(&self.enter_blocks)
        }

        fn update(&mut self, _ctx: &mut Context<'_, O>) {
            self.push("update");
        }

        fn exit(&mut self, _ctx: &mut Context<'_, O>) -> bool {
            self.push("exit");
            gate(&self.exit_blocks)
        }
    }

    fn machine<O>(owner: O, log: &Log) -> StateMachine<O> {
        let mut machine = StateMachine::new(owner);
        machine.add_state(IDLE, Recorder::new("Idle", log)).unwrap();
        machine.add_state(PATROL, Recorder::new("Patrol", log)).unwrap();
        machine.add_state(COMBAT, Recorder::new("Combat", log)).unwrap();
        machine
    }

    fn started_in_idle<O>(owner: O, log: &Log) -> StateMachine<O> {
        let mut machine = machine(owner, log);
        machine.switch_state(IDLE).unwrap();
        machine.tick();
        log.borrow_mut().clear();
        machine
    }

    fn calls(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn add_state_rejects_reserved_ids() {
        let log = Log::default();
        let mut machine = machine((), &log);

        assert_eq!(
            machine.add_state(StateId::INVALID, Recorder::new("Bad", &log)),
            Err(RegistrationError::ReservedId(StateId::INVALID))
        );
        assert_eq!(
            machine.add_state(StateId::FINAL, Recorder::new("Bad", &log)),
            Err(RegistrationError::ReservedId(StateId::FINAL))
        );
        assert_eq!(machine.state_count(), 3);
        assert!(!machine.contains_state(StateId::FINAL));
    }

    #[test]
    fn add_state_never_overwrites() {
        let log = Log::default();
        let mut machine = machine((), &log);

        assert_eq!(
            machine.add_state(IDLE, Recorder::new("Impostor", &log)),
            Err(RegistrationError::DuplicateId(IDLE))
        );

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_name(), Some("Idle"));
    }

    #[test]
    fn fresh_machine_enters_on_first_tick() {
        let log = Log::default();
        let mut machine = machine((), &log);
        assert_eq!(machine.current_state_id(), StateId::INVALID);

        machine.tick();
        assert!(calls(&log).is_empty());

        machine.switch_state(PATROL).unwrap();
        assert!(machine.is_transitioning());
        assert_eq!(machine.current_state_id(), StateId::INVALID);

        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);
        assert_eq!(machine.last_state_id(), StateId::INVALID);
        assert!(!machine.is_transitioning());
        assert_eq!(calls(&log), vec!["Patrol.enter"]);
    }

    #[test]
    fn update_runs_once_per_tick_when_idle() {
        let log = Log::default();
        let mut machine = started_in_idle((), &log);

        machine.tick();
        machine.tick();

        assert_eq!(calls(&log), vec!["Idle.update", "Idle.update"]);
    }

    #[test]
    fn exit_gate_holds_transition_without_updates() {
        let log = Log::default();
        let mut machine = machine((), &log);
        machine
            .add_state(StateId::new(9), Recorder::new("Sticky", &log).blocking_exit(2))
            .unwrap();
        machine.switch_state(9).unwrap();
        machine.tick();
        log.borrow_mut().clear();

        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), StateId::new(9));
        assert_eq!(machine.phase(), Phase::Exit);
        machine.tick();
        assert_eq!(machine.current_state_id(), StateId::new(9));
        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);

        assert_eq!(
            calls(&log),
            vec!["Sticky.exit", "Sticky.exit", "Sticky.exit", "Patrol.enter"]
        );
    }

    #[test]
    fn enter_gate_retries_enter_only() {
        let log = Log::default();
        let mut machine = StateMachine::new(());
        machine.add_state(IDLE, Recorder::new("Idle", &log)).unwrap();
        machine
            .add_state(PATROL, Recorder::new("Patrol", &log).blocking_enter(2))
            .unwrap();
        machine.switch_state(IDLE).unwrap();
        machine.tick();
        log.borrow_mut().clear();

        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);
        assert!(machine.is_transitioning());
        assert_eq!(machine.phase(), Phase::Enter);

        machine.tick();
        machine.tick();
        assert!(!machine.is_transitioning());
        assert_eq!(
            calls(&log),
            vec!["Idle.exit", "Patrol.enter", "Patrol.enter", "Patrol.enter"]
        );
    }

    #[test]
    fn switch_to_current_state_is_noop() {
        let log = Log::default();
        let mut machine = started_in_idle((), &log);

        assert_eq!(
            machine.switch_state(IDLE),
            Err(SwitchError::AlreadyActive(IDLE))
        );
        assert!(!machine.is_transitioning());
        assert_eq!(machine.next_state_id(), IDLE);
    }

    #[test]
    fn switch_rejects_reserved_and_unknown_ids() {
        let log = Log::default();
        let mut machine = started_in_idle((), &log);

        assert_eq!(
            machine.switch_state(StateId::FINAL),
            Err(SwitchError::Reserved(StateId::FINAL))
        );
        assert_eq!(
            machine.switch_state(StateId::INVALID),
            Err(SwitchError::Reserved(StateId::INVALID))
        );
        assert_eq!(
            machine.switch_state(77),
            Err(SwitchError::UnknownState(StateId::new(77)))
        );
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn switch_to_last_state_returns() {
        let log = Log::default();
        let mut machine = machine((), &log);
        assert_eq!(machine.switch_to_last_state(), Err(SwitchError::NoLastState));

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        machine.switch_state(COMBAT).unwrap();
        machine.tick();
        assert_eq!(machine.last_state_id(), IDLE);

        machine.switch_to_last_state().unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), IDLE);
        assert_eq!(machine.last_state_id(), COMBAT);
    }

    #[test]
    fn newer_request_replaces_uncommitted_target() {
        let log = Log::default();
        let mut machine = machine((), &log);
        machine
            .add_state(StateId::new(9), Recorder::new("Sticky", &log).blocking_exit(1))
            .unwrap();
        machine.switch_state(9).unwrap();
        machine.tick();

        machine.switch_state(PATROL).unwrap();
        machine.tick();
        machine.switch_state(COMBAT).unwrap();
        machine.tick();

        assert_eq!(machine.current_state_id(), COMBAT);
        assert_eq!(machine.last_state_id(), StateId::new(9));
        assert!(!machine.history().get_path().contains(&PATROL));
    }

    #[test]
    fn retarget_while_entering_leaves_through_exit() {
        let log = Log::default();
        let mut machine = StateMachine::new(());
        machine.add_state(IDLE, Recorder::new("Idle", &log)).unwrap();
        machine
            .add_state(PATROL, Recorder::new("Patrol", &log).blocking_enter(u32::MAX))
            .unwrap();
        machine.add_state(COMBAT, Recorder::new("Combat", &log)).unwrap();
        machine.switch_state(IDLE).unwrap();
        machine.tick();

        machine.switch_state(PATROL).unwrap();
        machine.tick();
        log.borrow_mut().clear();

        machine.switch_state(COMBAT).unwrap();
        machine.tick();

        assert_eq!(calls(&log), vec!["Patrol.exit", "Combat.enter"]);
        assert_eq!(machine.current_state_id(), COMBAT);
        assert_eq!(machine.last_state_id(), PATROL);
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn final_trigger_overrides_and_locks() {
        let log = Log::default();
        let mut machine = started_in_idle(Cell::new(false), &log);
        machine.add_final_state(Recorder::new("Dead", &log), |dead: &Cell<bool>| dead.get());

        machine.switch_state(PATROL).unwrap();
        machine.owner().set(true);
        machine.tick();

        assert!(machine.is_in_final());
        assert_eq!(machine.current_state_id(), StateId::FINAL);
        assert_eq!(calls(&log), vec!["Dead.enter"]);

        assert_eq!(machine.switch_state(COMBAT), Err(SwitchError::Finalized));
        machine.tick();
        assert_eq!(machine.current_state_name(), Some("Dead"));
    }

    #[test]
    fn reset_leaves_final_state() {
        let log = Log::default();
        let mut machine = started_in_idle(Cell::new(true), &log);
        machine.add_final_state(Recorder::new("Dead", &log), |dead: &Cell<bool>| dead.get());
        machine.tick();
        assert!(machine.is_in_final());

        machine.owner().set(false);
        machine.reset();

        assert!(!machine.is_in_final());
        assert_eq!(machine.current_state_id(), StateId::INVALID);
        assert_eq!(machine.state_count(), 4);
        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);
    }

    #[test]
    fn second_final_state_replaces_first() {
        let log = Log::default();
        let mut machine = machine(Cell::new(false), &log);
        machine.add_final_state(Recorder::new("Dead", &log), |_: &Cell<bool>| false);
        machine.add_final_state(Recorder::new("Gone", &log), |flag: &Cell<bool>| flag.get());

        machine.owner().set(true);
        machine.tick();

        assert_eq!(machine.current_state_name(), Some("Gone"));
    }

    #[test]
    fn duration_tracks_each_phase() {
        let clock = ManualClock::new();
        let mut machine = StateMachine::with_clock((), Rc::new(clock.clone()));
        machine
            .add_state(IDLE, FnState::<()>::new("Idle", |_| {}).on_exit(|ctx| ctx.duration() >= 1.0))
            .unwrap();
        machine.add_state(PATROL, FnState::<()>::new("Patrol", |_| {})).unwrap();

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        clock.advance_secs(2.0);
        assert!((machine.duration() - 2.0).abs() < 1e-9);

        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), IDLE);
        clock.advance_secs(0.6);
        machine.tick();
        assert_eq!(machine.current_state_id(), IDLE);
        assert!((machine.duration() - 0.6).abs() < 1e-9);
        clock.advance_secs(0.6);
        machine.tick();

        assert_eq!(machine.current_state_id(), PATROL);
        assert!(machine.duration().abs() < 1e-9);
        assert_eq!(machine.history().last().map(|t| t.ticks), Some(3));
    }

    #[test]
    fn enter_timer_keeps_running_across_retries() {
        let clock = ManualClock::new();
        let mut machine = StateMachine::with_clock((), Rc::new(clock.clone()));
        machine.add_state(IDLE, FnState::<()>::new("Idle", |_| {})).unwrap();
        machine
            .add_state(PATROL, FnState::<()>::new("Patrol", |_| {}).on_enter(|ctx| ctx.duration() >= 1.0))
            .unwrap();

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.phase(), Phase::Enter);

        clock.advance_secs(0.6);
        machine.tick();
        assert_eq!(machine.phase(), Phase::Enter);
        assert!(machine.is_transitioning());
        assert!((machine.duration() - 0.6).abs() < 1e-9);

        clock.advance_secs(0.6);
        machine.tick();
        assert_eq!(machine.phase(), Phase::Update);
        assert!(!machine.is_transitioning());
        assert!(machine.duration().abs() < 1e-9);
        assert_eq!(machine.current_state_id(), PATROL);
        assert_eq!(machine.history().last().map(|t| t.ticks), Some(3));
    }

    #[test]
    fn final_trigger_interrupts_gated_enter() {
        let log = Log::default();
        let mut machine = StateMachine::new(Cell::new(false));
        machine.add_state(IDLE, Recorder::new("Idle", &log)).unwrap();
        machine
            .add_state(PATROL, Recorder::new("Patrol", &log).blocking_enter(u32::MAX))
            .unwrap();
        machine.add_final_state(Recorder::new("Dead", &log), |dead: &Cell<bool>| dead.get());

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        machine.switch_state(PATROL).unwrap();
        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);
        assert_eq!(machine.phase(), Phase::Enter);
        log.borrow_mut().clear();

        machine.owner().set(true);
        machine.tick();

        assert_eq!(machine.current_state_id(), StateId::FINAL);
        assert_eq!(machine.last_state_id(), PATROL);
        assert!(machine.is_in_final());
        assert!(!machine.is_transitioning());
        assert_eq!(calls(&log), vec!["Dead.enter"]);
    }

    #[test]
    fn callbacks_can_request_switches() {
        let mut machine = StateMachine::new(0u32);
        machine
            .add_state(
                IDLE,
                FnState::<u32>::new("Idle", |ctx| {
                    *ctx.owner_mut() += 1;
                    if *ctx.owner() >= 2 {
                        ctx.switch_state(PATROL);
                    }
                }),
            )
            .unwrap();
        machine
            .add_state(
                PATROL,
                FnState::<u32>::new("Patrol", |_| {}).on_enter(|ctx| {
                    ctx.switch_to_last_state();
                    true
                }),
            )
            .unwrap();

        machine.switch_state(IDLE).unwrap();
        machine.tick();
        machine.tick();
        assert!(!machine.is_transitioning());
        machine.tick();
        assert_eq!(machine.next_state_id(), PATROL);

        machine.tick();
        assert_eq!(machine.current_state_id(), PATROL);
        assert!(machine.is_transitioning());
        assert_eq!(machine.next_state_id(), IDLE);

        machine.tick();
        assert_eq!(machine.current_state_id(), IDLE);
        assert_eq!(machine.history().len(), 3);
    }

    #[test]
    fn exec_info_reports_state_and_phase() {
        let log = Log::default();
        let mut machine = started_in_idle((), &log);
        machine
            .add_state(StateId::new(9), Recorder::new("Sticky", &log).blocking_enter(1))
            .unwrap();

        assert_eq!(machine.exec_info().to_string(), "CurrentState: Idle Method: Update");

        machine.switch_state(9).unwrap();
        machine.tick();
        let info = machine.exec_info();
        assert_eq!(info.state_name.as_deref(), Some("Sticky"));
        assert_eq!(info.phase, Phase::Enter);
        assert!(info.transitioning);
    }
}
