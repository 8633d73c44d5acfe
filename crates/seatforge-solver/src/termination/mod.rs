//! Termination conditions for the improvement loops.
//!
//! Construction never stops early, so every termination still yields a
//! complete assignment.

mod composite;
mod external;
mod step_count;

use std::fmt::Debug;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;

/// Trait for determining when to stop improving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool;
}

impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        match self {
            Some(t) => t.is_terminated(solver_scope),
            None => false,
        }
    }
}
