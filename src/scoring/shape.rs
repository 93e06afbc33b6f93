//! Membership functions for fuzzy sets.

use super::centroid::Centroid;
use super::error::ScoringError;

/// A fuzzy set over one input axis.
pub trait FuzzyShape {
    /// Degree in `[0, 1]` to which `x` belongs to the set.
    fn membership(&self, x: f32) -> f32;

    /// Centroid of the shape clipped at height `degree`.
    fn centroid(&self, degree: f32) -> Centroid;
}

/// Trapezoid rising over `[a, b]`, flat over `[b, c]`, falling over `[c, d]`.
///
/// `a == b` (or `c == d`) gives a shoulder that stays at `1` up to the edge of
/// the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidShape {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

impl TrapezoidShape {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Result<Self, ScoringError> {
        if a <= b && b <= c && c <= d {
            Ok(Self { a, b, c, d })
        } else {
            Err(ScoringError::InvalidTrapezoid { a, b, c, d })
        }
    }

    pub fn points(&self) -> (f32, f32, f32, f32) {
        (self.a, self.b, self.c, self.d)
    }
}

impl FuzzyShape for TrapezoidShape {
    fn membership(&self, x: f32) -> f32 {
        let Self { a, b, c, d } = *self;
        if (b..=c).contains(&x) {
            1.0
        } else if x <= a || x >= d {
            0.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (d - x) / (d - c)
        }
    }

    fn centroid(&self, degree: f32) -> Centroid {
        clipped_centroid(self.a, self.b, self.c, self.d, degree)
    }
}

/// Triangle rising over `[a, b]` and falling over `[b, c]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShape {
    a: f32,
    b: f32,
    c: f32,
}

impl TriangleShape {
    pub fn new(a: f32, b: f32, c: f32) -> Result<Self, ScoringError> {
        if a <= b && b <= c {
            Ok(Self { a, b, c })
        } else {
            Err(ScoringError::InvalidTriangle { a, b, c })
        }
    }

    pub fn points(&self) -> (f32, f32, f32) {
        (self.a, self.b, self.c)
    }
}

impl FuzzyShape for TriangleShape {
    fn membership(&self, x: f32) -> f32 {
        let Self { a, b, c } = *self;
        if x == b {
            1.0
        } else if x <= a || x >= c {
            0.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    fn centroid(&self, degree: f32) -> Centroid {
        clipped_centroid(self.a, self.b, self.b, self.c, degree)
    }
}

/// Split the shape clipped at `height` into rise, plateau and fall, each
/// placed at its midpoint and weighted by its area.
fn clipped_centroid(a: f32, b: f32, c: f32, d: f32, height: f32) -> Centroid {
    if height == 0.0 {
        return Centroid::default();
    }

    let rise_end = a + height * (b - a);
    let fall_start = d - height * (d - c);

    Centroid::combine([
        Centroid::new((a + rise_end) / 2.0, (rise_end - a) * height / 2.0),
        Centroid::new((fall_start + d) / 2.0, (d - fall_start) * height / 2.0),
        Centroid::new((rise_end + fall_start) / 2.0, (fall_start - rise_end) * height),
    ])
}
