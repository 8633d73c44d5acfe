//! Score evaluation for complete or partial assignments.

use seatforge_core::domain::{Assignment, DeskLayout};
use seatforge_core::CompatibilityMatrix;

use crate::model::ConstraintModel;
use crate::score::SeatingScore;

/// Objective values of one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingMetrics {
    /// Compatibility summed over every desk holding two students.
    pub pair_score_sum: f64,
    /// `pair_score_sum / pair_count`, or 0.0 when no desk holds a pair.
    pub average_pair_score: f64,
    /// Weighted zone-preference mismatches.
    pub soft_penalty_total: f64,
    /// Desks holding two students.
    pub pair_count: usize,
    /// Desks holding one student.
    pub single_count: usize,
    /// Broken hard constraints.
    pub hard_violation_count: usize,
}

impl SeatingMetrics {
    /// Collapses the metrics into a comparable score.
    pub fn score(&self) -> SeatingScore {
        SeatingScore::of(
            -(self.hard_violation_count as i64),
            self.pair_score_sum - self.soft_penalty_total,
        )
    }
}

/// Computes the objective of any candidate assignment.
///
/// Desks are visited in assignment order, so repeated evaluation of the same
/// assignment yields bit-identical sums.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{Assignment, DeskLayout};
/// use seatforge_core::CompatibilityMatrix;
/// use seatforge_scoring::{ConstraintModel, ScoreEvaluator};
///
/// let layout = DeskLayout::uniform(2, 0);
/// let matrix = CompatibilityMatrix::from_pairs([("a", "b", 9.0), ("c", "d", 7.0)]).unwrap();
/// let model = ConstraintModel::default();
/// let evaluator = ScoreEvaluator::new(&matrix, &model, &layout);
///
/// let mut assignment = Assignment::empty(&layout);
/// assignment.seat(&"pair-01".into(), "a".into());
/// assignment.seat(&"pair-01".into(), "b".into());
/// assignment.seat(&"pair-02".into(), "c".into());
/// assignment.seat(&"pair-02".into(), "d".into());
///
/// let metrics = evaluator.evaluate(&assignment);
/// assert_eq!(metrics.pair_score_sum, 16.0);
/// assert_eq!(metrics.average_pair_score, 8.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoreEvaluator<'a> {
    matrix: &'a CompatibilityMatrix,
    model: &'a ConstraintModel,
    layout: &'a DeskLayout,
}

impl<'a> ScoreEvaluator<'a> {
    pub fn new(
        matrix: &'a CompatibilityMatrix,
        model: &'a ConstraintModel,
        layout: &'a DeskLayout,
    ) -> Self {
        Self {
            matrix,
            model,
            layout,
        }
    }

    /// Evaluates `assignment` against the matrix and constraint model.
    pub fn evaluate(&self, assignment: &Assignment) -> SeatingMetrics {
        let mut pair_score_sum = 0.0;
        let mut pair_count = 0;
        let mut single_count = 0;

        for seating in assignment.iter() {
            match seating.occupants.as_slice() {
                [a, b] => {
                    pair_score_sum += self.matrix.score(a, b);
                    pair_count += 1;
                }
                [_] => single_count += 1,
                _ => {}
            }
        }

        let average_pair_score = if pair_count > 0 {
            pair_score_sum / pair_count as f64
        } else {
            0.0
        };

        SeatingMetrics {
            pair_score_sum,
            average_pair_score,
            soft_penalty_total: self.model.soft_penalty(self.layout, assignment),
            pair_count,
            single_count,
            hard_violation_count: self.model.violates_hard(assignment).len(),
        }
    }

    /// Shorthand for `evaluate(assignment).score()`.
    pub fn score(&self, assignment: &Assignment) -> SeatingScore {
        self.evaluate(assignment).score()
    }
}
