//! Where a transition table reads the current state from.

use crate::core::StateId;
use crate::machine::StateMachine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Supplies the key that [`TransitionTable::build`](super::TransitionTable::build)
/// looks up.
///
/// The table keeps the source for its whole lifetime and reads it on every
/// `build()`, so the source is usually a shared handle the host updates.
pub trait StateSource<K> {
    fn current_state(&self) -> K;
}

impl<K: Copy> StateSource<K> for Cell<K> {
    fn current_state(&self) -> K {
        self.get()
    }
}

/// # Panics
///
/// Panics if the cell is mutably borrowed while the table reads it.
impl<K: Clone> StateSource<K> for RefCell<K> {
    fn current_state(&self) -> K {
        self.borrow().clone()
    }
}

impl<K, T> StateSource<K> for &T
where
    T: StateSource<K> + ?Sized,
{
    fn current_state(&self) -> K {
        (**self).current_state()
    }
}

impl<K, T> StateSource<K> for Rc<T>
where
    T: StateSource<K> + ?Sized,
{
    fn current_state(&self) -> K {
        (**self).current_state()
    }
}

/// Reads the machine's active state.
///
/// A table built over `&machine` borrows the machine for as long as the table
/// lives, so the machine cannot be ticked or switched meanwhile. This suits a
/// one-off query. A table that lives alongside a running machine should use
/// another source and be asked with
/// [`build_for`](super::TransitionTable::build_for):
///
/// ```rust
/// use std::cell::Cell;
/// use tickmind::builder::ConditionBlock;
/// use tickmind::core::FnState;
/// use tickmind::{StateId, StateMachine};
///
/// let mut machine = StateMachine::new(());
/// machine.add_state(1, FnState::<()>::new("Idle", |_| {})).unwrap();
/// machine.add_state(2, FnState::<()>::new("Patrol", |_| {})).unwrap();
///
/// let table = ConditionBlock::begin(Cell::new(StateId::INVALID))
///     .transitions()
///     .from(StateId::new(1))
///     .to(StateId::new(2))
///     .condition(|| true)
///     .end()
///     .finalize()
///     .unwrap();
///
/// machine.switch_state(1).unwrap();
/// machine.tick();
/// if let Some(next) = table.build_for(&machine.current_state_id()) {
///     machine.switch_state(next).unwrap();
/// }
/// machine.tick();
/// assert_eq!(machine.current_state_id(), StateId::new(2));
/// ```
impl<O> StateSource<StateId> for StateMachine<O> {
    fn current_state(&self) -> StateId {
        self.current_state_id()
    }
}
