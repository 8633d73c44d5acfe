//! Error types for SeatForge

use thiserror::Error;

use crate::domain::{DeskId, StudentId};

/// Main error type for SeatForge operations.
///
/// Only malformed input and capacity infeasibility are errors. Hard-constraint
/// infeasibility and cancellation are reported alongside a best-effort
/// assignment instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeatForgeError {
    /// Two roster entries share an identifier.
    #[error("Duplicate student id: {0}")]
    DuplicateStudent(StudentId),

    /// Two desks share an identifier.
    #[error("Duplicate desk id: {0}")]
    DuplicateDesk(DeskId),

    /// A desk capacity outside `1..=2`.
    #[error("Desk {desk} has capacity {capacity}, expected 1 or 2")]
    InvalidCapacity { desk: DeskId, capacity: u8 },

    /// A compatibility score outside `[0, 10]` (or not a number).
    #[error("Compatibility score {score} for ({a}, {b}) is outside [0, 10]")]
    ScoreOutOfRange {
        a: StudentId,
        b: StudentId,
        score: f64,
    },

    /// The same unordered pair listed twice with different values.
    #[error("Pair ({a}, {b}) listed twice with different scores ({first} vs {second})")]
    ConflictingScore {
        a: StudentId,
        b: StudentId,
        first: f64,
        second: f64,
    },

    /// A pair or constraint that relates a student to themselves.
    #[error("Student {0} cannot be paired with itself")]
    SelfPair(StudentId),

    /// A score or constraint references a student missing from the roster.
    #[error("Unknown student {student} referenced by {context}")]
    UnknownStudent {
        student: StudentId,
        context: &'static str,
    },

    /// A soft-constraint weight that is negative or not finite.
    #[error("Invalid zone preference weight {weight} for student {student}")]
    InvalidWeight { student: StudentId, weight: f64 },

    /// Not enough seats for the roster. Checked before solving.
    #[error("Not enough seats: {students} students but {seats} seats across {desks} desks")]
    InsufficientCapacity {
        students: usize,
        seats: usize,
        desks: usize,
    },

    /// Error in solver configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SeatForgeError {
    /// Returns true for malformed-input errors the caller must fix.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            SeatForgeError::InsufficientCapacity { .. } | SeatForgeError::Config(_)
        )
    }

    /// Returns true when the roster does not fit the desk layout.
    pub fn is_capacity(&self) -> bool {
        matches!(self, SeatForgeError::InsufficientCapacity { .. })
    }
}

/// Result type alias for SeatForge operations
pub type Result<T> = std::result::Result<T, SeatForgeError>;
