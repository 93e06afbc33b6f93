//! Transition conditions and the policies that rank them.
//!
//! A condition is a zero-argument closure. Boolean conditions gate an edge
//! all-or-nothing; utility conditions return a score and the edge with the
//! best mean score wins. Both are driven by the same [`Verdict`] trait, so the
//! declaration and compilation pipeline is shared.

use std::fmt;

/// Zero-argument predicate or scorer attached to a transition.
///
/// # Example
///
/// ```rust
/// use tickmind::builder::Condition;
///
/// let hungry = Condition::new(|| true);
/// let threat = Condition::new(|| 0.75_f32);
///
/// assert!(hungry.evaluate());
/// assert_eq!(threat.evaluate(), 0.75);
/// ```
pub struct Condition<V> {
    eval: Box<dyn Fn() -> V>,
}

impl<V> Condition<V> {
    pub fn new<F>(eval: F) -> Self
    where
        F: Fn() -> V + 'static,
    {
        Condition {
            eval: Box::new(eval),
        }
    }

    pub fn evaluate(&self) -> V {
        (self.eval)()
    }
}

impl<V, F> From<F> for Condition<V>
where
    F: Fn() -> V + 'static,
{
    fn from(eval: F) -> Self {
        Condition::new(eval)
    }
}

impl<V> fmt::Debug for Condition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition")
    }
}

/// Output type of a condition, and how a list of them is judged.
///
/// `score` returns `None` when the conditions disqualify the edge. With
/// `SHORT_CIRCUIT` the first qualifying edge wins; otherwise every candidate
/// is scored and the strictly greatest score wins, earliest first on ties.
pub trait Verdict: Copy + fmt::Debug + 'static {
    const SHORT_CIRCUIT: bool;

    /// Value produced by the implicit condition of a `default(..)` edge.
    fn always() -> Self;

    fn score(conditions: &[Condition<Self>]) -> Option<f32>;
}

/// All conditions must hold; evaluation stops at the first `false`.
impl Verdict for bool {
    const SHORT_CIRCUIT: bool = true;

    fn always() -> Self {
        true
    }

    fn score(conditions: &[Condition<Self>]) -> Option<f32> {
        conditions
            .iter()
            .all(|condition| condition.evaluate())
            .then_some(1.0)
    }
}

/// Mean of every condition's score. A NaN mean disqualifies the edge.
impl Verdict for f32 {
    const SHORT_CIRCUIT: bool = false;

    fn always() -> Self {
        1.0
    }

    fn score(conditions: &[Condition<Self>]) -> Option<f32> {
        if conditions.is_empty() {
            return None;
        }
        let total: f32 = conditions.iter().map(Condition::evaluate).sum();
        let mean = total / conditions.len() as f32;
        (!mean.is_nan()).then_some(mean)
    }
}
