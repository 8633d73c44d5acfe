//! Constraint model: hard separation rules and soft zone preferences.

use std::collections::HashSet;

use seatforge_core::domain::{Assignment, DeskId, DeskLayout, SeatingProblem, ZoneTag};
use seatforge_core::{HardConstraint, SoftConstraint, StudentId};

/// A hard constraint broken by an assignment, with the desk where it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardViolation {
    pub constraint: HardConstraint,
    pub desk: DeskId,
}

/// Hard and soft constraints of one solve.
///
/// Student zone-preference tags are expanded into implicit
/// [`SoftConstraint::PrefersZone`] entries at the default weight. An explicit
/// preference for the same student and zone replaces the implicit one.
///
/// # Example
///
/// ```
/// use seatforge_core::domain::{Assignment, DeskLayout, DeskSlot, SeatingProblem, Student};
/// use seatforge_core::Constraint;
/// use seatforge_scoring::ConstraintModel;
///
/// let layout = DeskLayout::new(vec![DeskSlot::pair("d1"), DeskSlot::pair("d2").with_zone("quiet")]);
/// let problem = SeatingProblem::new(
///     vec![Student::new("a").with_preference("quiet"), Student::new("b")],
///     layout.clone(),
/// )
/// .with_constraint(Constraint::must_separate("a", "b"));
/// let model = ConstraintModel::from_problem(&problem, 2.0);
///
/// let mut together = Assignment::empty(&layout);
/// together.seat(&"d1".into(), "a".into());
/// together.seat(&"d1".into(), "b".into());
///
/// assert_eq!(model.violates_hard(&together).len(), 1);
/// assert_eq!(model.soft_penalty(&layout, &together), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    hard: Vec<HardConstraint>,
    soft: Vec<SoftConstraint>,
}

impl ConstraintModel {
    /// Creates a model from explicit constraint lists.
    pub fn new(hard: Vec<HardConstraint>, soft: Vec<SoftConstraint>) -> Self {
        Self { hard, soft }
    }

    /// Builds the model for a problem, expanding roster preferences at `default_zone_weight`.
    pub fn from_problem(problem: &SeatingProblem, default_zone_weight: f64) -> Self {
        let hard: Vec<HardConstraint> = problem.hard_constraints().cloned().collect();
        let mut soft: Vec<SoftConstraint> = problem.soft_constraints().cloned().collect();

        let explicit: HashSet<(StudentId, ZoneTag)> = soft
            .iter()
            .map(|c| match c {
                SoftConstraint::PrefersZone { student, zone, .. } => (student.clone(), zone.clone()),
            })
            .collect();

        for student in &problem.roster {
            for zone in &student.preferences {
                if !explicit.contains(&(student.id.clone(), zone.clone())) {
                    soft.push(SoftConstraint::PrefersZone {
                        student: student.id.clone(),
                        zone: zone.clone(),
                        weight: default_zone_weight,
                    });
                }
            }
        }

        Self { hard, soft }
    }

    pub fn hard_constraints(&self) -> &[HardConstraint] {
        &self.hard
    }

    pub fn soft_constraints(&self) -> &[SoftConstraint] {
        &self.soft
    }

    /// Returns true if `a` and `b` are forbidden from sharing a desk.
    pub fn forbids(&self, a: &StudentId, b: &StudentId) -> bool {
        self.hard.iter().any(|c| match c {
            HardConstraint::MustSeparate(x, y) => (x == a && y == b) || (x == b && y == a),
        })
    }

    /// Hard constraints broken by `assignment`; empty if it is feasible.
    pub fn violates_hard(&self, assignment: &Assignment) -> Vec<HardViolation> {
        let mut violations = Vec::new();
        for constraint in &self.hard {
            match constraint {
                HardConstraint::MustSeparate(a, b) => {
                    for seating in assignment.iter() {
                        if seating.occupants.contains(a) && seating.occupants.contains(b) {
                            violations.push(HardViolation {
                                constraint: constraint.clone(),
                                desk: seating.desk.clone(),
                            });
                        }
                    }
                }
            }
        }
        violations
    }

    /// Sum of weights of zone preferences the assignment does not meet.
    ///
    /// A student who is not seated, or sits at a desk missing from `layout`,
    /// misses every preference.
    pub fn soft_penalty(&self, layout: &DeskLayout, assignment: &Assignment) -> f64 {
        self.soft
            .iter()
            .map(|constraint| match constraint {
                SoftConstraint::PrefersZone {
                    student,
                    zone,
                    weight,
                } => {
                    let satisfied = assignment
                        .desk_of(student)
                        .and_then(|desk| layout.get(desk))
                        .is_some_and(|desk| desk.has_zone(zone));
                    if satisfied {
                        0.0
                    } else {
                        *weight
                    }
                }
            })
            .sum()
    }
}
