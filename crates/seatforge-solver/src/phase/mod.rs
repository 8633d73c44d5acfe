//! Solver phases
//!
//! Phases run in sequence on one [`SolverScope`]:
//! - [`PairingPhase`]: groups students into pairs and singles
//! - [`PlacementPhase`]: puts pairs and singles on concrete desks

pub mod pairing;
pub mod placement;

use std::fmt::Debug;

use crate::scope::SolverScope;

pub use pairing::{Pairing, PairingPhase};
pub use placement::{DeskContent, Placement, PlacementPhase};

/// Strict-gain threshold shared by the improvement loops.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A phase of the solving process.
///
/// Each phase reads the scope left by the previous one and stores its own
/// result back into it.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests;
