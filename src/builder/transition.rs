//! Edges and the staged builders that declare them.
//!
//! A block is declared as a chain of consuming builders:
//!
//! ```text
//! TransitionBlock --transitions()--> FromBuilder --from(k)--> ToBuilder
//! ToBuilder --to(k)--> ConditionBuilder --conditions(..) / condition(f)--> ToBuilder
//! ToBuilder --default(k) / end()--> TransitionBlock
//! ```
//!
//! Each stage only exposes the calls that are legal at that point, so an edge
//! can never be recorded without going through a condition list.

use super::block::TransitionBlock;
use super::condition::{Condition, Verdict};
use std::fmt;

/// A directed edge guarded by a list of conditions.
pub struct Transition<K, V> {
    pub(crate) from: K,
    pub(crate) to: K,
    pub(crate) conditions: Vec<Condition<V>>,
    pub(crate) fallback: bool,
}

impl<K, V> Transition<K, V> {
    pub fn from(&self) -> &K {
        &self.from
    }

    pub fn to(&self) -> &K {
        &self.to
    }

    pub fn conditions(&self) -> &[Condition<V>] {
        &self.conditions
    }

    /// True for edges declared with `default(..)`.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Transition<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("conditions", &self.conditions.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Waiting for the source state of the next group of edges.
#[must_use = "edges are only recorded once the chain returns to the block"]
pub struct FromBuilder<K, V, Src> {
    block: TransitionBlock<K, V, Src>,
}

impl<K, V, Src> FromBuilder<K, V, Src> {
    pub(crate) fn new(block: TransitionBlock<K, V, Src>) -> Self {
        FromBuilder { block }
    }

    pub fn from(self, state: K) -> ToBuilder<K, V, Src> {
        ToBuilder {
            block: self.block,
            from: state,
        }
    }
}

/// Declaring edges out of one source state.
#[must_use = "edges are only recorded once the chain returns to the block"]
pub struct ToBuilder<K, V, Src> {
    block: TransitionBlock<K, V, Src>,
    from: K,
}

impl<K: Clone, V: Verdict, Src> ToBuilder<K, V, Src> {
    /// Start an edge to `state`; its conditions come next.
    pub fn to(self, state: K) -> ConditionBuilder<K, V, Src> {
        ConditionBuilder {
            parent: self,
            to: state,
        }
    }

    /// Add a fallback edge to `state` and close the group.
    ///
    /// The fallback always qualifies (it scores `1.0` in a utility block) and
    /// is evaluated after every conditioned edge of the same source.
    pub fn default(mut self, state: K) -> TransitionBlock<K, V, Src> {
        self.block.push(Transition {
            from: self.from,
            to: state,
            conditions: vec![Condition::new(V::always)],
            fallback: true,
        });
        self.block
    }

    /// Close the group without a fallback.
    pub fn end(self) -> TransitionBlock<K, V, Src> {
        self.block
    }

    fn push(&mut self, to: K, conditions: Vec<Condition<V>>) {
        self.block.push(Transition {
            from: self.from.clone(),
            to,
            conditions,
            fallback: false,
        });
    }
}

/// Waiting for the conditions of one edge.
#[must_use = "an edge is only recorded once its conditions are given"]
pub struct ConditionBuilder<K, V, Src> {
    parent: ToBuilder<K, V, Src>,
    to: K,
}

impl<K: Clone, V: Verdict, Src> ConditionBuilder<K, V, Src> {
    /// Attach a list of conditions; all of them are evaluated together.
    ///
    /// Closures of different types can be mixed by wrapping each in
    /// [`Condition::new`].
    pub fn conditions<I>(mut self, conditions: I) -> ToBuilder<K, V, Src>
    where
        I: IntoIterator,
        I::Item: Into<Condition<V>>,
    {
        let conditions = conditions.into_iter().map(Into::into).collect();
        self.parent.push(self.to, conditions);
        self.parent
    }

    /// Attach a single condition.
    pub fn condition<F>(mut self, condition: F) -> ToBuilder<K, V, Src>
    where
        F: Fn() -> V + 'static,
    {
        self.parent.push(self.to, vec![Condition::new(condition)]);
        self.parent
    }
}
