//! External termination via a shared `AtomicBool` flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when an external flag is set.
///
/// The flag is shared, so another thread can request termination while a
/// solve is running.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use seatforge_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(flag.clone());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_set());
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _solver_scope: &SolverScope<'_>) -> bool {
        self.is_set()
    }
}
