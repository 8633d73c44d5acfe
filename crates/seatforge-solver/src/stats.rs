//! Solver statistics.

use std::time::{Duration, Instant};

/// Solver-level statistics.
///
/// Tracks aggregate counters across all phases of a solve run. The counters
/// depend only on the input; the elapsed time is informational.
///
/// # Example
///
/// ```
/// use seatforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverStats {
    #[cfg_attr(feature = "serde", serde(skip))]
    start_time: Option<Instant>,
    /// Total steps taken across all phases.
    pub step_count: u64,
    /// Total moves evaluated across all phases.
    pub moves_evaluated: u64,
    /// Total moves accepted across all phases.
    pub moves_accepted: u64,
}

impl SolverStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

impl PartialEq for SolverStats {
    fn eq(&self, other: &Self) -> bool {
        self.step_count == other.step_count
            && self.moves_evaluated == other.moves_evaluated
            && self.moves_accepted == other.moves_accepted
    }
}

impl Eq for SolverStats {}
