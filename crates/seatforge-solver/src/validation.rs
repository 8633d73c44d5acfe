//! Result validation.
//!
//! Runs after the solver finishes and reports (never throws) everything a
//! caller must surface: structural defects and residual hard violations.

use std::collections::HashMap;
use std::fmt;

use seatforge_core::domain::{Assignment, DeskId, SeatingProblem, StudentId};
use seatforge_scoring::{ConstraintModel, HardViolation};

/// A problem found in a finished assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Violation {
    /// A must-separate rule broken at a desk.
    HardConstraint(HardViolation),
    /// A roster student seated nowhere.
    MissingStudent { student: StudentId },
    /// A student seated more than once.
    DuplicateSeat { student: StudentId, seats: usize },
    /// A desk holding more students than it has seats.
    OverCapacity {
        desk: DeskId,
        capacity: u8,
        occupants: usize,
    },
    /// A desk that is not part of the layout.
    UnknownDesk { desk: DeskId },
    /// A seated student who is not on the roster.
    UnknownStudent { student: StudentId },
}

impl Violation {
    /// Returns true for broken hard constraints, false for structural defects.
    pub fn is_hard_constraint(&self) -> bool {
        matches!(self, Violation::HardConstraint(_))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HardConstraint(v) => write!(f, "{} broken at desk {}", v.constraint, v.desk),
            Violation::MissingStudent { student } => write!(f, "student {student} is not seated"),
            Violation::DuplicateSeat { student, seats } => {
                write!(f, "student {student} is seated {seats} times")
            }
            Violation::OverCapacity {
                desk,
                capacity,
                occupants,
            } => write!(f, "desk {desk} holds {occupants} students but seats {capacity}"),
            Violation::UnknownDesk { desk } => write!(f, "desk {desk} is not in the layout"),
            Violation::UnknownStudent { student } => {
                write!(f, "student {student} is not on the roster")
            }
        }
    }
}

/// Feasibility, unresolved violations, and whether the result is partial.
///
/// A report that is not [`clean`](ValidationReport::is_clean) must be shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    pub feasible: bool,
    pub violations: Vec<Violation>,
    pub partial: bool,
}

impl ValidationReport {
    /// Feasible and complete.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && !self.partial
    }

    /// Broken hard constraints only.
    pub fn hard_violations(&self) -> impl Iterator<Item = &HardViolation> {
        self.violations.iter().filter_map(|v| match v {
            Violation::HardConstraint(h) => Some(h),
            _ => None,
        })
    }

    /// Structural defects: anything other than a broken hard constraint.
    pub fn structural_violations(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_hard_constraint())
    }
}

/// Checks an assignment against the roster, the layout and the hard rules.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{Assignment, DeskLayout, SeatingProblem, Student};
/// use seatforge_scoring::ConstraintModel;
/// use seatforge_solver::ResultValidator;
///
/// let problem = SeatingProblem::new(
///     vec![Student::new("a"), Student::new("b")],
///     DeskLayout::uniform(1, 0),
/// );
/// let model = ConstraintModel::from_problem(&problem, 1.0);
///
/// let mut assignment = Assignment::empty(&problem.layout);
/// assignment.seat(&"pair-01".into(), "a".into());
///
/// let report = ResultValidator::new(&problem, &model).validate(&assignment, false);
/// assert!(!report.feasible);
/// assert_eq!(report.violations.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResultValidator<'a> {
    problem: &'a SeatingProblem,
    model: &'a ConstraintModel,
}

impl<'a> ResultValidator<'a> {
    pub fn new(problem: &'a SeatingProblem, model: &'a ConstraintModel) -> Self {
        Self { problem, model }
    }

    /// Validates `assignment`. `partial` is carried into the report unchanged.
    pub fn validate(&self, assignment: &Assignment, partial: bool) -> ValidationReport {
        let mut violations = Vec::new();
        let layout = &self.problem.layout;

        let mut seats: HashMap<&StudentId, usize> = HashMap::new();
        for seating in assignment.iter() {
            match layout.get(&seating.desk) {
                Some(desk) => {
                    if seating.occupants.len() > desk.capacity as usize {
                        violations.push(Violation::OverCapacity {
                            desk: seating.desk.clone(),
                            capacity: desk.capacity,
                            occupants: seating.occupants.len(),
                        });
                    }
                }
                None => violations.push(Violation::UnknownDesk {
                    desk: seating.desk.clone(),
                }),
            }
            for student in &seating.occupants {
                *seats.entry(student).or_default() += 1;
            }
        }

        // Roster order keeps the report deterministic.
        for student in &self.problem.roster {
            match seats.remove(&student.id) {
                None => violations.push(Violation::MissingStudent {
                    student: student.id.clone(),
                }),
                Some(count) if count > 1 => violations.push(Violation::DuplicateSeat {
                    student: student.id.clone(),
                    seats: count,
                }),
                Some(_) => {}
            }
        }

        let mut strangers: Vec<&StudentId> = seats.into_keys().collect();
        strangers.sort();
        violations.extend(strangers.into_iter().map(|s| Violation::UnknownStudent {
            student: s.clone(),
        }));

        violations.extend(
            self.model
                .violates_hard(assignment)
                .into_iter()
                .map(Violation::HardConstraint),
        );

        ValidationReport {
            feasible: violations.is_empty(),
            violations,
            partial,
        }
    }
}
