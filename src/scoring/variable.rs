//! Linguistic variables with low, medium and high sets.

use super::centroid::Centroid;
use super::shape::{FuzzyShape, TrapezoidShape, TriangleShape};
use serde::{Deserialize, Serialize};

/// Membership degrees of one input in each set of a [`Variable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Degrees {
    pub low: f32,
    pub medium: f32,
    pub high: f32,
}

impl Degrees {
    pub fn is_low(&self) -> bool {
        self.low >= self.medium && self.low >= self.high
    }

    pub fn is_medium(&self) -> bool {
        self.medium >= self.low && self.medium >= self.high
    }

    pub fn is_high(&self) -> bool {
        self.high >= self.low && self.high >= self.medium
    }
}

/// A crisp input described by three overlapping fuzzy sets.
///
/// [`evaluate`](Self::evaluate) remembers the last degrees so the `is_*`
/// queries and [`crisp_value`](Self::crisp_value) can read them.
/// [`fuzzify`](Self::fuzzify) computes degrees without touching that state,
/// which suits `Fn` conditions of a utility table.
///
/// # Example
///
/// ```rust
/// use tickmind::scoring::{TrapezoidShape, TriangleShape, Variable};
///
/// let mut health = Variable::new(
///     TrapezoidShape::new(0.0, 0.0, 30.0, 50.0)?,
///     TriangleShape::new(30.0, 50.0, 70.0)?,
///     TrapezoidShape::new(50.0, 70.0, 100.0, 100.0)?,
/// );
///
/// health.evaluate(45.0);
/// assert!(health.is_medium());
/// assert!(!health.is_high());
/// # Ok::<(), tickmind::scoring::ScoringError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    low: TrapezoidShape,
    medium: TriangleShape,
    high: TrapezoidShape,
    degrees: Degrees,
}

impl Variable {
    pub fn new(low: TrapezoidShape, medium: TriangleShape, high: TrapezoidShape) -> Self {
        Self {
            low,
            medium,
            high,
            degrees: Degrees::default(),
        }
    }

    /// Degrees of `x` in each set.
    pub fn fuzzify(&self, x: f32) -> Degrees {
        Degrees {
            low: self.low.membership(x),
            medium: self.medium.membership(x),
            high: self.high.membership(x),
        }
    }

    /// Fuzzify `x` and keep the result for later queries.
    pub fn evaluate(&mut self, x: f32) -> Degrees {
        self.degrees = self.fuzzify(x);
        self.degrees
    }

    /// Degrees from the last [`evaluate`](Self::evaluate), all zero before the first.
    pub fn degrees(&self) -> Degrees {
        self.degrees
    }

    pub fn is_low(&self) -> bool {
        self.degrees.is_low()
    }

    pub fn is_medium(&self) -> bool {
        self.degrees.is_medium()
    }

    pub fn is_high(&self) -> bool {
        self.degrees.is_high()
    }

    /// Defuzzify the last evaluated degrees.
    pub fn crisp_value(&self) -> f32 {
        self.defuzzify(self.degrees)
    }

    /// Combined centroid of the three sets, each clipped at its degree.
    pub fn defuzzify(&self, degrees: Degrees) -> f32 {
        Centroid::combine([
            self.low.centroid(degrees.low),
            self.medium.centroid(degrees.medium),
            self.high.centroid(degrees.high),
        ])
        .value
    }
}
