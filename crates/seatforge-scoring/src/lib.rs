//! Constraint model and score evaluation for SeatForge.
//!
//! - [`ConstraintModel`]: hard must-separate rules and soft zone preferences
//! - [`ScoreEvaluator`]: objective metrics of an assignment
//! - [`SeatingScore`]: hard/soft score used to compare candidates

pub mod evaluator;
pub mod model;
pub mod score;


pub use evaluator::{ScoreEvaluator, SeatingMetrics};
pub use model::{ConstraintModel, HardViolation};
pub use score::SeatingScore;
