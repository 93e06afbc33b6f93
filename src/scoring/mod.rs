//! Scoring helpers for utility-table conditions.
//!
//! Utility conditions return an `f32`. This module turns raw owner values
//! into such scores, either as a weighted mean of several factors or through
//! fuzzy sets (membership degrees and centroid defuzzification).
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickmind::builder::UtilityBlock;
//! use tickmind::scoring::{weighted_utility, TrapezoidShape, TriangleShape, Variable};
//!
//! let health = Rc::new(Variable::new(
//!     TrapezoidShape::new(0.0, 0.0, 30.0, 50.0)?,
//!     TriangleShape::new(30.0, 50.0, 70.0)?,
//!     TrapezoidShape::new(50.0, 70.0, 100.0, 100.0)?,
//! ));
//! let hp = Rc::new(Cell::new(20.0_f32));
//!
//! let (flee_set, flee_hp) = (Rc::clone(&health), Rc::clone(&hp));
//! let (fight_set, fight_hp) = (Rc::clone(&health), Rc::clone(&hp));
//! let table = UtilityBlock::begin(Cell::new("Patrol"))
//!     .transitions()
//!     .from("Patrol")
//!     .to("Flee")
//!     .condition(move || flee_set.fuzzify(flee_hp.get()).low)
//!     .to("Fight")
//!     .condition(move || {
//!         let degrees = fight_set.fuzzify(fight_hp.get());
//!         weighted_utility(&[degrees.medium, degrees.high], &[1.0, 2.0]).unwrap_or(0.0)
//!     })
//!     .end()
//!     .finalize()
//!     .unwrap();
//!
//! assert_eq!(table.build(), Some("Flee"));
//! hp.set(90.0);
//! assert_eq!(table.build(), Some("Fight"));
//! # Ok::<(), tickmind::scoring::ScoringError>(())
//! ```

pub mod centroid;
pub mod error;
pub mod shape;
pub mod utility;
pub mod variable;

pub use centroid::Centroid;
pub use error::ScoringError;
pub use shape::{FuzzyShape, TrapezoidShape, TriangleShape};
pub use utility::weighted_utility;
pub use variable::{Degrees, Variable};
