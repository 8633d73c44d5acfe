//! The complete input of one solve call.

use std::collections::HashSet;

use crate::compatibility::CompatibilityMatrix;
use crate::constraint::{Constraint, HardConstraint, SoftConstraint};
use crate::error::{Result, SeatForgeError};

use super::{DeskLayout, Student, StudentId};

/// Roster, layout, compatibility scores and constraints for one classroom.
///
/// Constructed fresh per solve. The solver never mutates it and keeps no
/// reference to it after returning.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{DeskLayout, SeatingProblem, Student};
/// use seatforge_core::{CompatibilityMatrix, Constraint};
///
/// let problem = SeatingProblem::new(
///     vec![Student::new("a"), Student::new("b"), Student::new("c")],
///     DeskLayout::uniform(1, 1),
/// )
/// .with_matrix(CompatibilityMatrix::from_pairs([("a", "b", 8.0)]).unwrap())
/// .with_constraint(Constraint::must_separate("a", "c"));
///
/// assert!(problem.validate().is_ok());
/// assert!(problem.check_capacity().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeatingProblem {
    pub roster: Vec<Student>,
    pub layout: DeskLayout,
    pub matrix: CompatibilityMatrix,
    pub constraints: Vec<Constraint>,
}

impl SeatingProblem {
    pub fn new(roster: Vec<Student>, layout: DeskLayout) -> Self {
        Self {
            roster,
            layout,
            matrix: CompatibilityMatrix::new(),
            constraints: Vec::new(),
        }
    }

    pub fn with_matrix(mut self, matrix: CompatibilityMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn student_count(&self) -> usize {
        self.roster.len()
    }

    pub fn hard_constraints(&self) -> impl Iterator<Item = &HardConstraint> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Hard(h) => Some(h),
            Constraint::Soft(_) => None,
        })
    }

    pub fn soft_constraints(&self) -> impl Iterator<Item = &SoftConstraint> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Soft(s) => Some(s),
            Constraint::Hard(_) => None,
        })
    }

    /// Validates the input before solving.
    ///
    /// Checks, in order:
    /// 1. No duplicate student ids
    /// 2. Desk ids unique and capacities in `1..=2`
    /// 3. Every explicit score refers to roster students
    /// 4. Every constraint refers to roster students, with no self-separation
    /// 5. Zone preference weights are finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut ids: HashSet<&StudentId> = HashSet::with_capacity(self.roster.len());
        for student in &self.roster {
            if !ids.insert(&student.id) {
                return Err(SeatForgeError::DuplicateStudent(student.id.clone()));
            }
        }

        self.layout.validate()?;

        for (pair, _) in self.matrix.explicit_pairs() {
            for student in [pair.first(), pair.second()] {
                if !ids.contains(student) {
                    return Err(SeatForgeError::UnknownStudent {
                        student: student.clone(),
                        context: "compatibility matrix",
                    });
                }
            }
        }

        for hard in self.hard_constraints() {
            let [a, b] = hard.students();
            for student in [a, b] {
                if !ids.contains(student) {
                    return Err(SeatForgeError::UnknownStudent {
                        student: student.clone(),
                        context: "must-separate constraint",
                    });
                }
            }
            if a == b {
                return Err(SeatForgeError::SelfPair(a.clone()));
            }
        }

        for soft in self.soft_constraints() {
            if !ids.contains(soft.student()) {
                return Err(SeatForgeError::UnknownStudent {
                    student: soft.student().clone(),
                    context: "zone preference",
                });
            }
            let weight = soft.weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(SeatForgeError::InvalidWeight {
                    student: soft.student().clone(),
                    weight,
                });
            }
        }

        Ok(())
    }

    /// Fails when the layout has fewer seats than the roster has students.
    pub fn check_capacity(&self) -> Result<()> {
        let seats = self.layout.seat_count();
        if seats < self.roster.len() {
            return Err(SeatForgeError::InsufficientCapacity {
                students: self.roster.len(),
                seats,
                desks: self.layout.len(),
            });
        }
        Ok(())
    }
}
