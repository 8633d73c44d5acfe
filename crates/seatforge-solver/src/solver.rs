//! Solver implementation.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use seatforge_config::SolverConfig;
use seatforge_core::domain::SeatingProblem;
use seatforge_scoring::{ConstraintModel, ScoreEvaluator};
use tracing::{info, warn};

use crate::error::SolveError;
use crate::indexed::IndexedProblem;
use crate::outcome::SeatingOutcome;
use crate::phase::{PairingPhase, Phase, Placement, PlacementPhase};
use crate::scope::SolverScope;
use crate::termination::{ExternalTermination, OrTermination, StepCountTermination};
use crate::validation::ResultValidator;

/// The seating solver: pairing phase, then placement phase.
///
/// A solver holds only tuning and a cancellation flag. Every call to
/// [`solve`](Solver::solve) works on its own data, so one solver may be used
/// from several threads at once; they then share the cancellation flag.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{DeskLayout, SeatingProblem, Student};
/// use seatforge_core::CompatibilityMatrix;
/// use seatforge_config::SolverConfig;
/// use seatforge_solver::Solver;
///
/// let problem = SeatingProblem::new(
///     vec![Student::new("a"), Student::new("b"), Student::new("c")],
///     DeskLayout::uniform(1, 1),
/// )
/// .with_matrix(CompatibilityMatrix::from_pairs([("a", "c", 9.0)]).unwrap());
///
/// let outcome = Solver::new(SolverConfig::default()).solve(&problem).unwrap();
/// assert!(outcome.report.is_clean());
/// assert!(outcome.assignment.share_desk(&"a".into(), &"c".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses `flag` as the cancellation signal.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = flag;
        self
    }

    /// The cancellation flag; setting it stops a running solve.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.terminate_early_flag.clone()
    }

    /// Requests cancellation. Thread-safe.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.store(true, Ordering::SeqCst);
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validates `problem` and computes a seating.
    ///
    /// # Errors
    ///
    /// Fails on invalid tuning, malformed input, or a layout with fewer
    /// seats than students. Nothing is solved in those cases.
    pub fn solve(&self, problem: &SeatingProblem) -> Result<SeatingOutcome, SolveError> {
        self.config.validate()?;

        let matrix = match self.config.neutral_score {
            Some(score) => Cow::Owned(problem.matrix.clone().with_default_score(score)?),
            None => Cow::Borrowed(&problem.matrix),
        };

        problem.validate()?;
        problem.check_capacity()?;

        let model = ConstraintModel::from_problem(problem, self.config.default_zone_weight);
        let indexed = IndexedProblem::new(problem, &matrix, &model);

        info!(
            event = "solve_start",
            student_count = indexed.student_count() as u64,
            desk_count = indexed.desk_count() as u64,
            seat_count = problem.layout.seat_count() as u64,
            hard_constraint_count = model.hard_constraints().len() as u64,
            soft_constraint_count = model.soft_constraints().len() as u64,
        );

        let termination = OrTermination::new((
            ExternalTermination::new(self.terminate_early_flag.clone()),
            self.config.step_limit().map(StepCountTermination::new),
        ));
        let mut solver_scope = SolverScope::new(&indexed).with_termination(termination);
        solver_scope.set_terminate_early_flag(self.terminate_early_flag.clone());
        solver_scope.start_solving();

        let mut pairing = PairingPhase::new(self.config.pairing.improvement_pass_limit);
        let mut placement = PlacementPhase::new(self.config.placement.max_iterations);
        pairing.solve(&mut solver_scope);
        placement.solve(&mut solver_scope);

        let partial = solver_scope.is_interrupted();
        let final_placement = match solver_scope.placement() {
            Some(p) => p.clone(),
            None => Placement::construct(&indexed, solver_scope.pairing()),
        };
        let elapsed = solver_scope.stats().elapsed();
        let (_, diagnostics, stats) = solver_scope.into_parts();

        let assignment = final_placement.to_assignment(&indexed);
        let metrics = ScoreEvaluator::new(&matrix, &model, &problem.layout).evaluate(&assignment);
        let report = ResultValidator::new(problem, &model).validate(&assignment, partial);

        for violation in &report.violations {
            warn!(event = "violation", violation = %violation);
        }

        info!(
            event = "solve_end",
            duration_ms = elapsed.as_millis() as u64,
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            pair_score_sum = metrics.pair_score_sum,
            soft_penalty = metrics.soft_penalty_total,
            violations = report.violations.len() as u64,
            partial = partial,
            score = %metrics.score(),
        );

        Ok(SeatingOutcome {
            assignment,
            metrics,
            report,
            diagnostics,
            stats,
        })
    }
}
