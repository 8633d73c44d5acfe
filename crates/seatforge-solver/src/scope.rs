//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use seatforge_scoring::SeatingScore;
use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::indexed::IndexedProblem;
use crate::phase::pairing::Pairing;
use crate::phase::placement::Placement;
use crate::stats::SolverStats;
use crate::termination::Termination;

/// Working state of one solve, shared by the phases in sequence.
///
/// Holds the indexed problem, the current pairing and placement, counters,
/// and the diagnostics collected so far.
pub struct SolverScope<'p> {
    problem: &'p IndexedProblem,
    termination: Option<Box<dyn Termination>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    pairing: Pairing,
    placement: Option<Placement>,
    total_step_count: u64,
    stats: SolverStats,
    diagnostics: Vec<Diagnostic>,
    interrupted: bool,
    budget_reported: bool,
}

impl<'p> SolverScope<'p> {
    pub fn new(problem: &'p IndexedProblem) -> Self {
        Self {
            problem,
            termination: None,
            terminate_early_flag: None,
            pairing: Pairing::all_singles(problem.student_count()),
            placement: None,
            total_step_count: 0,
            stats: SolverStats::default(),
            diagnostics: Vec::new(),
            interrupted: false,
            budget_reported: false,
        }
    }

    /// Sets the termination checked by the improvement loops.
    pub fn with_termination(mut self, termination: impl Termination + 'static) -> Self {
        self.termination = Some(Box::new(termination));
        self
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn start_solving(&mut self) {
        self.stats.start();
        self.total_step_count = 0;
    }

    pub fn problem(&self) -> &'p IndexedProblem {
        self.problem
    }

    pub fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    pub fn set_pairing(&mut self, pairing: Pairing) {
        self.pairing = pairing;
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.stats.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.stats.record_move(accepted);
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true once the caller has requested cancellation.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Returns true if a phase stopped early because of cancellation.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Returns true if the cancellation flag or the termination fires.
    pub fn should_terminate(&self) -> bool {
        if self.is_terminate_early() {
            return true;
        }
        self.termination
            .as_ref()
            .is_some_and(|t| t.is_terminated(self))
    }

    /// Checks termination from inside a phase loop and records why it stopped.
    ///
    /// Cancellation marks the result partial. Any other termination is a
    /// budget stop and only adds a diagnostic.
    pub fn check_termination(&mut self, phase: &'static str) -> bool {
        if !self.should_terminate() {
            return false;
        }
        if self.is_terminate_early() {
            if !self.interrupted {
                self.interrupted = true;
                warn!(event = "cancelled", phase = phase, steps = self.total_step_count);
                self.diagnostics.push(Diagnostic::Cancelled {
                    phase: phase.to_string(),
                });
            }
        } else if !self.budget_reported {
            self.budget_reported = true;
            self.diagnostics.push(Diagnostic::IterationBudgetExhausted {
                phase: phase.to_string(),
                limit: self.total_step_count,
            });
        }
        true
    }

    /// Score of the working pairing and placement.
    pub fn current_score(&self) -> SeatingScore {
        let hard = self.pairing.violation_count(self.problem) as i64;
        let penalty = self
            .placement
            .as_ref()
            .map_or(0.0, |p| p.penalty(self.problem));
        SeatingScore::of(-hard, self.pairing.pair_score(self.problem) - penalty)
    }

    /// Consumes the scope, returning placement, diagnostics and statistics.
    pub fn into_parts(self) -> (Option<Placement>, Vec<Diagnostic>, SolverStats) {
        (self.placement, self.diagnostics, self.stats)
    }
}
