//! Weighted points used to defuzzify clipped shapes.

use serde::{Deserialize, Serialize};

/// A point on the input axis carrying the area that sits over it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub value: f32,
    pub weight: f32,
}

impl Centroid {
    pub fn new(value: f32, weight: f32) -> Self {
        Self { value, weight }
    }

    /// Merge centroids into their weighted average.
    ///
    /// The result carries the total weight. A non-positive total yields the
    /// zero centroid.
    pub fn combine(centroids: impl IntoIterator<Item = Centroid>) -> Centroid {
        let (weighted_sum, total) = centroids
            .into_iter()
            .fold((0.0_f32, 0.0_f32), |(sum, total), c| {
                (sum + c.value * c.weight, total + c.weight)
            });

        if total > 0.0 {
            Centroid::new(weighted_sum / total, total)
        } else {
            Centroid::default()
        }
    }
}
