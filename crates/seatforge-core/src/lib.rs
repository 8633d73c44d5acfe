//! SeatForge Core - domain types for classroom seating assignment
//!
//! This crate provides the fundamental abstractions for SeatForge:
//! - Roster, desk layout and assignment types
//! - The compatibility matrix oracle
//! - Hard and soft constraint types
//! - The error taxonomy shared by every crate

pub mod compatibility;
pub mod constraint;
pub mod domain;
pub mod error;

#[cfg(test)]
mod compatibility_tests;

pub use compatibility::{CompatibilityMatrix, StudentPair, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE};
pub use constraint::{Constraint, ConstraintLevel, HardConstraint, SoftConstraint};
pub use domain::{
    Assignment, DeskId, DeskLayout, DeskSeating, DeskSlot, SeatingProblem, Student, StudentId,
    ZoneTag,
};
pub use error::{Result, SeatForgeError};
