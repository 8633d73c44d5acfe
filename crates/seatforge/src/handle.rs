//! Cancellation handle shared between a running solve and its caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation token.
///
/// Clones share one flag. Cancelling from any thread makes a running solve
/// stop at its next check and return its best complete seating so far.
///
/// # Example
///
/// ```
/// use seatforge::SolveHandle;
///
/// let handle = SolveHandle::new();
/// let remote = handle.clone();
/// std::thread::spawn(move || remote.cancel()).join().unwrap();
/// assert!(handle.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveHandle {
    flag: Arc<AtomicBool>,
}

impl SolveHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The underlying flag, for [`Solver::with_cancel_flag`](crate::Solver::with_cancel_flag).
    pub fn flag(&self) -> Arc<AtomicBool> {
        self.flag.clone()
    }
}
