//! SeatForge - A classroom seating engine in Rust
//!
//! Give it a roster, a desk layout, pairwise compatibility scores and
//! separation rules; get back a seating, its metrics and a validation report.
//!
//! # Example
//!
//! ```rust
//! use seatforge::prelude::*;
//!
//! let matrix = CompatibilityMatrix::from_pairs([("ana", "ben", 9.0), ("cy", "dee", 7.0)]).unwrap();
//! let problem = SeatingProblem::new(
//!     vec![Student::new("ana"), Student::new("ben"), Student::new("cy"), Student::new("dee")],
//!     DeskLayout::uniform(2, 0),
//! )
//! .with_matrix(matrix);
//!
//! let outcome = seatforge::solve(&problem).unwrap();
//! assert!(outcome.report.is_clean());
//! assert_eq!(outcome.metrics.pair_score_sum, 16.0);
//! ```

// Domain types
pub use seatforge_core::{
    Assignment, CompatibilityMatrix, Constraint, ConstraintLevel, DeskId, DeskLayout, DeskSeating,
    DeskSlot, HardConstraint, SeatForgeError, SeatingProblem, SoftConstraint, Student, StudentId,
    StudentPair, ZoneTag, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE,
};

// Scoring
pub use seatforge_scoring::{ConstraintModel, HardViolation, ScoreEvaluator, SeatingMetrics, SeatingScore};

// Configuration
pub use seatforge_config::{ClassroomConfig, ConfigError, SolverConfig};

// Engine
pub use seatforge_solver::{
    Diagnostic, ResultValidator, SeatingOutcome, SolveError, Solver, SolverStats,
    ValidationReport, Violation,
};

#[cfg(feature = "console")]
pub mod console;

mod handle;
pub use handle::SolveHandle;

/// Solves `problem` with default tuning.
pub fn solve(problem: &SeatingProblem) -> Result<SeatingOutcome, SolveError> {
    solve_with_config(problem, &SolverConfig::default())
}

/// Solves `problem` with the given tuning.
pub fn solve_with_config(
    problem: &SeatingProblem,
    config: &SolverConfig,
) -> Result<SeatingOutcome, SolveError> {
    solve_with_handle(problem, config, &SolveHandle::new())
}

/// Solves `problem`, stopping early if `handle` is cancelled.
///
/// A cancelled solve still returns a complete seating, with
/// `report.partial` set.
pub fn solve_with_handle(
    problem: &SeatingProblem,
    config: &SolverConfig,
    handle: &SolveHandle,
) -> Result<SeatingOutcome, SolveError> {
    #[cfg(feature = "console")]
    console::init();

    Solver::new(config.clone())
        .with_cancel_flag(handle.flag())
        .solve(problem)
}

pub mod prelude {
    pub use super::{solve, solve_with_config, solve_with_handle, SolveHandle};
    pub use super::{
        Assignment, CompatibilityMatrix, Constraint, DeskLayout, DeskSlot, SeatingProblem, Student,
    };
    pub use super::{SeatingOutcome, SolveError, SolverConfig, ValidationReport, Violation};
}
