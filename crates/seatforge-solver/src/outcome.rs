//! The result of one solve.

use seatforge_core::domain::Assignment;
use seatforge_scoring::{SeatingMetrics, SeatingScore};

use crate::diagnostic::Diagnostic;
use crate::stats::SolverStats;
use crate::validation::ValidationReport;

/// Assignment, metrics, validation report, diagnostics and statistics.
///
/// The assignment is owned by the caller and is complete even when the
/// report is not clean.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingOutcome {
    pub assignment: Assignment,
    pub metrics: SeatingMetrics,
    pub report: ValidationReport,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: SolverStats,
}

impl SeatingOutcome {
    /// Returns true if the solve was cancelled before finishing.
    pub fn is_partial(&self) -> bool {
        self.report.partial
    }

    /// Returns true if no violation remains.
    pub fn is_feasible(&self) -> bool {
        self.report.feasible
    }

    /// Score of the returned assignment.
    pub fn score(&self) -> SeatingScore {
        self.metrics.score()
    }
}
