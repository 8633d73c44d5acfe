//! Composite OR termination.
//!
//! Uses macro-generated tuple implementations.

use super::Termination;
use crate::scope::SolverScope;

/// Combines multiple terminations with OR logic.
///
/// Wraps a tuple of terminations. Terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
/// use seatforge_solver::termination::{ExternalTermination, OrTermination, StepCountTermination};
///
/// // Terminate on cancellation OR after 1000 steps
/// let termination = OrTermination::new((
///     ExternalTermination::new(Arc::new(AtomicBool::new(false))),
///     StepCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(solver_scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
