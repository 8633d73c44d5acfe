//! SeatForge Solver Engine
//!
//! This crate provides the seating engine:
//! - [`Solver`]: validates input, then runs the phases
//! - Phases: pairing (graph matching) and placement (desk swaps)
//! - Termination conditions: step budget and external cancellation
//! - [`ResultValidator`] and the [`ValidationReport`] returned with every result
//!
//! The engine is synchronous, single-threaded and seed-free: identical input
//! yields an identical assignment.

pub mod diagnostic;
pub mod error;
pub mod indexed;
pub mod outcome;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use diagnostic::Diagnostic;
pub use error::SolveError;
pub use indexed::IndexedProblem;
pub use outcome::SeatingOutcome;
pub use phase::{DeskContent, Pairing, PairingPhase, Phase, Placement, PlacementPhase};
pub use scope::SolverScope;
pub use solver::Solver;
pub use stats::SolverStats;
pub use termination::{ExternalTermination, OrTermination, StepCountTermination, Termination};
pub use validation::{ResultValidator, ValidationReport, Violation};
