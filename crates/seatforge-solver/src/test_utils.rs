//! Helpers shared by the unit tests of this crate.

use seatforge_core::domain::SeatingProblem;
use seatforge_scoring::ConstraintModel;

use crate::indexed::IndexedProblem;

/// Indexes `problem` with its own matrix and unit zone weights.
pub fn indexed(problem: &SeatingProblem) -> IndexedProblem {
    let model = ConstraintModel::from_problem(problem, 1.0);
    IndexedProblem::new(problem, &problem.matrix, &model)
}

/// Index of the student with `id`.
pub fn index_of(problem: &IndexedProblem, id: &str) -> usize {
    (0..problem.student_count())
        .find(|&i| problem.student(i).as_str() == id)
        .expect("student is on the roster")
}
