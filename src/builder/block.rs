//! Transition blocks: declared edges, validated and compiled into a lookup table.

use super::condition::Verdict;
use super::error::{BuildError, EmptyConditions};
use super::source::StateSource;
use super::transition::{FromBuilder, Transition};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Boolean block: the first edge whose conditions all hold wins.
pub type ConditionBlock<K, Src> = TransitionBlock<K, bool, Src>;

/// Utility block: the edge with the highest mean score wins.
pub type UtilityBlock<K, Src> = TransitionBlock<K, f32, Src>;

pub type ConditionTable<K, Src> = TransitionTable<K, bool, Src>;

pub type UtilityTable<K, Src> = TransitionTable<K, f32, Src>;

/// Edges under declaration, not yet validated.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickmind::builder::ConditionBlock;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Mode { Idle, Patrol }
///
/// let current = Rc::new(Cell::new(Mode::Idle));
/// let bored = Rc::new(Cell::new(true));
/// let flag = Rc::clone(&bored);
///
/// let table = ConditionBlock::begin(Rc::clone(&current))
///     .transitions()
///     .from(Mode::Idle)
///     .to(Mode::Patrol)
///     .condition(move || flag.get())
///     .end()
///     .transitions()
///     .from(Mode::Patrol)
///     .default(Mode::Idle)
///     .finalize()
///     .unwrap();
///
/// assert_eq!(table.build(), Some(Mode::Patrol));
/// current.set(Mode::Patrol);
/// assert_eq!(table.build(), Some(Mode::Idle));
/// ```
pub struct TransitionBlock<K, V, Src> {
    transitions: Vec<Transition<K, V>>,
    source: Src,
}

impl<K, V, Src> TransitionBlock<K, V, Src> {
    pub fn begin(source: Src) -> Self {
        TransitionBlock {
            transitions: Vec::new(),
            source,
        }
    }

    /// Open a group of edges sharing one source state.
    pub fn transitions(self) -> FromBuilder<K, V, Src> {
        FromBuilder::new(self)
    }

    /// Edges declared so far, in declaration order.
    pub fn edges(&self) -> &[Transition<K, V>] {
        &self.transitions
    }

    pub(crate) fn push(&mut self, transition: Transition<K, V>) {
        self.transitions.push(transition);
    }
}

impl<K, V, Src> TransitionBlock<K, V, Src>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Verdict,
    Src: StateSource<K>,
{
    /// Validate every edge and compile the lookup index.
    ///
    /// All edges without conditions are reported together. Within each source
    /// state, fallback edges are ordered after the conditioned ones.
    pub fn finalize(self) -> Result<TransitionTable<K, V, Src>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let checks: Vec<Validation<(), NonEmptyVec<EmptyConditions>>> = self
            .transitions
            .iter()
            .map(|transition| {
                if transition.conditions.is_empty() {
                    Validation::fail(EmptyConditions {
                        from: format!("{:?}", transition.from),
                        to: format!("{:?}", transition.to),
                    })
                } else {
                    Validation::success(())
                }
            })
            .collect();

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(BuildError::EmptyConditions(errors.iter().cloned().collect()));
        }

        let mut index: HashMap<K, Vec<usize>> = HashMap::new();
        for fallback in [false, true] {
            for (position, transition) in self.transitions.iter().enumerate() {
                if transition.fallback == fallback {
                    index
                        .entry(transition.from.clone())
                        .or_default()
                        .push(position);
                }
            }
        }

        Ok(TransitionTable {
            transitions: self.transitions,
            index,
            source: self.source,
        })
    }
}

impl<K: fmt::Debug, V, Src> fmt::Debug for TransitionBlock<K, V, Src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionBlock")
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

/// A finalized block. Read-only; evaluated on demand.
pub struct TransitionTable<K, V, Src> {
    transitions: Vec<Transition<K, V>>,
    index: HashMap<K, Vec<usize>>,
    source: Src,
}

impl<K, V, Src> TransitionTable<K, V, Src>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Verdict,
    Src: StateSource<K>,
{
    /// Pick the next state for the source's current state.
    pub fn build(&self) -> Option<K> {
        self.build_for(&self.source.current_state())
    }

    /// Pick the next state for an explicit current state.
    pub fn build_for(&self, current: &K) -> Option<K> {
        self.select(current).map(|(transition, _)| transition.to.clone())
    }

    /// Like [`build`](Self::build), also returning the winning score.
    ///
    /// Boolean tables report `1.0` for every match.
    pub fn best(&self) -> Option<(K, f32)> {
        self.best_for(&self.source.current_state())
    }

    pub fn best_for(&self, current: &K) -> Option<(K, f32)> {
        self.select(current)
            .map(|(transition, score)| (transition.to.clone(), score))
    }

    /// Edges leaving `state`, in evaluation order.
    pub fn transitions_from<'a>(&'a self, state: &K) -> impl Iterator<Item = &'a Transition<K, V>> {
        self.index
            .get(state)
            .into_iter()
            .flatten()
            .map(|&position| &self.transitions[position])
    }

    /// Every edge, in declaration order.
    pub fn edges(&self) -> &[Transition<K, V>] {
        &self.transitions
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    fn select(&self, current: &K) -> Option<(&Transition<K, V>, f32)> {
        let mut best: Option<(&Transition<K, V>, f32)> = None;

        for transition in self.transitions_from(current) {
            let Some(score) = V::score(&transition.conditions) else {
                continue;
            };
            if V::SHORT_CIRCUIT {
                best = Some((transition, score));
                break;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((transition, score)),
            }
        }

        match best {
            Some((transition, score)) => {
                debug!(from = ?current, to = ?transition.to, score, "transition selected");
                Some((transition, score))
            }
            None => {
                warn!(state = ?current, "no transition matched");
                None
            }
        }
    }
}

impl<K: fmt::Debug, V, Src> fmt::Debug for TransitionTable<K, V, Src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
