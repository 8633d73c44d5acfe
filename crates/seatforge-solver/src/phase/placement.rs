//! Placement phase: pairs and singles onto concrete desks.
//!
//! Construction fills two-seat desks with pairs in layout order, then puts
//! singles on one-seat desks before any spare two-seat desk. A hill-climbing
//! pass then swaps the contents of two desks whenever that strictly lowers
//! the zone penalty. The pairing itself never changes here.

use std::time::Instant;

use seatforge_core::domain::{Assignment, DeskSeating};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::pairing::Pairing;
use super::{Phase, IMPROVEMENT_EPSILON};
use crate::diagnostic::Diagnostic;
use crate::indexed::IndexedProblem;
use crate::scope::SolverScope;

const PHASE_NAME: &str = "Placement";

/// What one desk holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeskContent {
    #[default]
    Empty,
    Single(usize),
    Pair(usize, usize),
}

impl DeskContent {
    /// Seats this content needs.
    pub fn size(&self) -> u8 {
        match self {
            DeskContent::Empty => 0,
            DeskContent::Single(_) => 1,
            DeskContent::Pair(_, _) => 2,
        }
    }

    /// Zone penalty of this content at `desk`.
    fn cost(&self, problem: &IndexedProblem, desk: usize) -> f64 {
        match *self {
            DeskContent::Empty => 0.0,
            DeskContent::Single(s) => problem.cost(s, desk),
            DeskContent::Pair(a, b) => problem.cost(a, desk) + problem.cost(b, desk),
        }
    }
}

/// Content of every desk, in layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    desks: Vec<DeskContent>,
}

impl Placement {
    /// Initial placement of a pairing.
    ///
    /// A unit that finds no desk is left out; the result validator reports
    /// the student as missing. This cannot happen once the capacity check
    /// and forced pairing have run.
    pub fn construct(problem: &IndexedProblem, pairing: &Pairing) -> Self {
        let mut desks = vec![DeskContent::Empty; problem.desk_count()];
        let pair_desks: Vec<usize> = (0..problem.desk_count())
            .filter(|&d| problem.capacity(d) == 2)
            .collect();
        let single_desks = (0..problem.desk_count()).filter(|&d| problem.capacity(d) == 1);

        let mut pair_slots = pair_desks.iter().copied();
        for (&(a, b), desk) in pairing.pairs().iter().zip(pair_slots.by_ref()) {
            desks[desk] = DeskContent::Pair(a, b);
        }

        let mut single_slots = single_desks.chain(pair_slots);
        for (&s, desk) in pairing.singles().iter().zip(single_slots.by_ref()) {
            desks[desk] = DeskContent::Single(s);
        }

        Self { desks }
    }

    pub fn desks(&self) -> &[DeskContent] {
        &self.desks
    }

    /// Total zone penalty, summed in layout order.
    pub fn penalty(&self, problem: &IndexedProblem) -> f64 {
        self.desks
            .iter()
            .enumerate()
            .map(|(d, content)| content.cost(problem, d))
            .sum()
    }

    /// Penalty change of swapping the contents of desks `i` and `j`, or `None`
    /// if the swap is pointless or does not fit.
    fn swap_delta(&self, problem: &IndexedProblem, i: usize, j: usize) -> Option<f64> {
        let (ci, cj) = (self.desks[i], self.desks[j]);
        if ci == cj || ci.size() > problem.capacity(j) || cj.size() > problem.capacity(i) {
            return None;
        }
        let before = ci.cost(problem, i) + cj.cost(problem, j);
        let after = ci.cost(problem, j) + cj.cost(problem, i);
        Some(after - before)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.desks.swap(i, j);
    }

    /// Converts to an assignment; occupants of a desk are listed in id order.
    pub fn to_assignment(&self, problem: &IndexedProblem) -> Assignment {
        let seatings = self
            .desks
            .iter()
            .enumerate()
            .map(|(d, content)| {
                let mut occupants = SmallVec::new();
                match *content {
                    DeskContent::Empty => {}
                    DeskContent::Single(s) => occupants.push(problem.student(s).clone()),
                    DeskContent::Pair(a, b) => {
                        occupants.push(problem.student(a.min(b)).clone());
                        occupants.push(problem.student(a.max(b)).clone());
                    }
                }
                DeskSeating {
                    desk: problem.desk(d).clone(),
                    occupants,
                }
            })
            .collect();
        Assignment::from_seatings(seatings)
    }
}

/// Placement phase.
///
/// # Example
///
/// ```
/// use seatforge_solver::phase::{Phase, PlacementPhase};
///
/// let phase = PlacementPhase::new(10_000);
/// assert_eq!(phase.phase_type_name(), "Placement");
/// ```
#[derive(Debug, Clone)]
pub struct PlacementPhase {
    max_iterations: u64,
}

impl PlacementPhase {
    pub fn new(max_iterations: u64) -> Self {
        Self { max_iterations }
    }

    /// First improving swap in `(i, j)` scan order, `i < j`.
    fn find_improving_swap(
        scope: &mut SolverScope<'_>,
        placement: &Placement,
    ) -> Option<(usize, usize, f64)> {
        let problem = scope.problem();
        let desk_count = placement.desks.len();
        for i in 0..desk_count {
            for j in (i + 1)..desk_count {
                let Some(delta) = placement.swap_delta(problem, i, j) else {
                    continue;
                };
                trace!(event = "candidate", kind = "swap", first = i, second = j, delta = delta);
                if delta < -IMPROVEMENT_EPSILON {
                    return Some((i, j, delta));
                }
                scope.record_move(false);
            }
        }
        None
    }
}

impl Phase for PlacementPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) {
        let start = Instant::now();
        let start_steps = solver_scope.total_step_count();
        let problem = solver_scope.problem();

        info!(
            event = "phase_start",
            phase = PHASE_NAME,
            phase_index = 1u64,
            desks = problem.desk_count() as u64,
        );

        let mut placement = Placement::construct(problem, solver_scope.pairing());

        let mut iterations = 0u64;
        loop {
            if solver_scope.check_termination(PHASE_NAME) {
                break;
            }
            let Some((i, j, delta)) = Self::find_improving_swap(solver_scope, &placement) else {
                break;
            };
            if iterations >= self.max_iterations {
                solver_scope.record_move(false);
                solver_scope.push_diagnostic(Diagnostic::IterationBudgetExhausted {
                    phase: PHASE_NAME.to_string(),
                    limit: self.max_iterations,
                });
                break;
            }
            placement.swap(i, j);
            iterations += 1;
            solver_scope.record_move(true);
            solver_scope.increment_step_count();
            debug!(
                event = "move_accepted",
                kind = "swap",
                first = %problem.desk(i),
                second = %problem.desk(j),
                delta = delta,
            );
        }

        solver_scope.set_placement(placement);

        let score = solver_scope.current_score();
        info!(
            event = "phase_end",
            phase = PHASE_NAME,
            phase_index = 1u64,
            duration_ms = start.elapsed().as_millis() as u64,
            steps = solver_scope.total_step_count() - start_steps,
            iterations = iterations,
            score = %score,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        PHASE_NAME
    }
}
