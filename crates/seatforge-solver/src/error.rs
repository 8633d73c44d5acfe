//! Errors returned before solving starts.

use seatforge_config::ConfigError;
use seatforge_core::SeatForgeError;
use thiserror::Error;

/// Why a solve was rejected.
///
/// Constraint infeasibility and cancellation are not errors; they are
/// reported in the result.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Problem(#[from] SeatForgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SolveError {
    /// Malformed input or tuning.
    pub fn is_validation(&self) -> bool {
        match self {
            SolveError::Problem(e) => e.is_validation(),
            SolveError::Config(_) => true,
        }
    }

    /// Fewer seats than students.
    pub fn is_capacity(&self) -> bool {
        matches!(self, SolveError::Problem(e) if e.is_capacity())
    }

    /// The underlying problem error, if any.
    pub fn as_problem(&self) -> Option<&SeatForgeError> {
        match self {
            SolveError::Problem(e) => Some(e),
            SolveError::Config(_) => None,
        }
    }
}
