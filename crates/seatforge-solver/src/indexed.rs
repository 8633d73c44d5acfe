//! Dense, index-based view of a seating problem.
//!
//! Students are sorted by id so that index order is id order; every tie in
//! the engine breaks on index and is therefore deterministic.

use seatforge_core::domain::{DeskId, SeatingProblem, StudentId};
use seatforge_core::{CompatibilityMatrix, SoftConstraint};
use seatforge_scoring::ConstraintModel;

/// Index-based problem consumed by the phases.
#[derive(Debug, Clone)]
pub struct IndexedProblem {
    students: Vec<StudentId>,
    desks: Vec<DeskId>,
    capacities: Vec<u8>,
    compat: Vec<f64>,
    forbidden: Vec<bool>,
    cost: Vec<f64>,
}

impl IndexedProblem {
    /// Builds the dense tables.
    ///
    /// `matrix` must already carry the neutral score of this solve; `model`
    /// must be built from the same problem.
    pub fn new(
        problem: &SeatingProblem,
        matrix: &CompatibilityMatrix,
        model: &ConstraintModel,
    ) -> Self {
        let mut students: Vec<StudentId> = problem.roster.iter().map(|s| s.id.clone()).collect();
        students.sort();
        let n = students.len();

        let mut compat = vec![0.0; n * n];
        let mut forbidden = vec![false; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let score = matrix.score(&students[i], &students[j]);
                compat[i * n + j] = score;
                compat[j * n + i] = score;

                let forbids = model.forbids(&students[i], &students[j]);
                forbidden[i * n + j] = forbids;
                forbidden[j * n + i] = forbids;
            }
        }

        let index_of = |id: &StudentId| students.binary_search(id).ok();

        let layout = &problem.layout;
        let desk_count = layout.len();
        let mut cost = vec![0.0; n * desk_count];
        for constraint in model.soft_constraints() {
            let SoftConstraint::PrefersZone {
                student,
                zone,
                weight,
            } = constraint;
            let Some(s) = index_of(student) else {
                continue;
            };
            for (d, desk) in layout.desks().iter().enumerate() {
                if !desk.has_zone(zone) {
                    cost[s * desk_count + d] += *weight;
                }
            }
        }

        Self {
            desks: layout.desks().iter().map(|d| d.id.clone()).collect(),
            capacities: layout.desks().iter().map(|d| d.capacity).collect(),
            students,
            compat,
            forbidden,
            cost,
        }
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn desk_count(&self) -> usize {
        self.desks.len()
    }

    pub fn student(&self, index: usize) -> &StudentId {
        &self.students[index]
    }

    pub fn desk(&self, index: usize) -> &DeskId {
        &self.desks[index]
    }

    pub fn capacity(&self, desk: usize) -> u8 {
        self.capacities[desk]
    }

    /// Number of desks with two seats.
    pub fn pair_desk_count(&self) -> usize {
        self.capacities.iter().filter(|&&c| c == 2).count()
    }

    /// Compatibility of two students.
    #[inline]
    pub fn compat(&self, a: usize, b: usize) -> f64 {
        self.compat[a * self.students.len() + b]
    }

    /// Returns true if `a` and `b` must not share a desk.
    #[inline]
    pub fn is_forbidden(&self, a: usize, b: usize) -> bool {
        self.forbidden[a * self.students.len() + b]
    }

    /// Returns true if `a` and `b` may share a desk.
    #[inline]
    pub fn is_legal(&self, a: usize, b: usize) -> bool {
        a != b && !self.is_forbidden(a, b)
    }

    /// Zone penalty of seating `student` at `desk`.
    #[inline]
    pub fn cost(&self, student: usize, desk: usize) -> f64 {
        self.cost[student * self.desks.len() + desk]
    }
}
