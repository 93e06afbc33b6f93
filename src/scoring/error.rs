//! Errors for scoring helpers.

use thiserror::Error;

/// Errors raised while building fuzzy shapes or computing a weighted utility.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ScoringError {
    #[error("Factors and weights differ in length ({factors} factors, {weights} weights)")]
    LengthMismatch { factors: usize, weights: usize },

    #[error("Trapezoid requires a <= b <= c <= d (got {a}, {b}, {c}, {d})")]
    InvalidTrapezoid { a: f32, b: f32, c: f32, d: f32 },

    #[error("Triangle requires a <= b <= c (got {a}, {b}, {c})")]
    InvalidTriangle { a: f32, b: f32, c: f32 },
}
