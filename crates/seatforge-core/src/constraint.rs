//! Hard and soft seating constraints.

use std::fmt;

use crate::domain::{StudentId, ZoneTag};

/// Rule that must never be violated in a feasible seating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HardConstraint {
    /// The two students may not share a desk.
    MustSeparate(StudentId, StudentId),
}

impl HardConstraint {
    pub fn must_separate(a: impl Into<StudentId>, b: impl Into<StudentId>) -> Self {
        HardConstraint::MustSeparate(a.into(), b.into())
    }

    /// Students the constraint refers to.
    pub fn students(&self) -> [&StudentId; 2] {
        match self {
            HardConstraint::MustSeparate(a, b) => [a, b],
        }
    }
}

impl fmt::Display for HardConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardConstraint::MustSeparate(a, b) => write!(f, "MustSeparate({a}, {b})"),
        }
    }
}

/// Preference whose violation lowers quality but keeps a seating valid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoftConstraint {
    /// The student should sit at a desk tagged with `zone`. Missing it costs `weight`.
    PrefersZone {
        student: StudentId,
        zone: ZoneTag,
        weight: f64,
    },
}

impl SoftConstraint {
    pub fn prefers_zone(
        student: impl Into<StudentId>,
        zone: impl Into<ZoneTag>,
        weight: f64,
    ) -> Self {
        SoftConstraint::PrefersZone {
            student: student.into(),
            zone: zone.into(),
            weight,
        }
    }

    pub fn student(&self) -> &StudentId {
        match self {
            SoftConstraint::PrefersZone { student, .. } => student,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            SoftConstraint::PrefersZone { weight, .. } => *weight,
        }
    }
}

impl fmt::Display for SoftConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftConstraint::PrefersZone {
                student,
                zone,
                weight,
            } => write!(f, "PrefersZone({student}, {zone}, {weight})"),
        }
    }
}

/// A constraint tagged by level.
///
/// # Example
///
/// ```
/// use seatforge_core::{Constraint, ConstraintLevel};
///
/// let hard = Constraint::must_separate("a", "b");
/// let soft = Constraint::prefers_zone("a", "quiet", 2.0);
///
/// assert_eq!(hard.level(), ConstraintLevel::Hard);
/// assert_eq!(soft.level(), ConstraintLevel::Soft);
/// assert_eq!(hard.to_string(), "MustSeparate(a, b)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    Hard(HardConstraint),
    Soft(SoftConstraint),
}

impl Constraint {
    pub fn must_separate(a: impl Into<StudentId>, b: impl Into<StudentId>) -> Self {
        Constraint::Hard(HardConstraint::must_separate(a, b))
    }

    pub fn prefers_zone(
        student: impl Into<StudentId>,
        zone: impl Into<ZoneTag>,
        weight: f64,
    ) -> Self {
        Constraint::Soft(SoftConstraint::prefers_zone(student, zone, weight))
    }

    pub fn level(&self) -> ConstraintLevel {
        match self {
            Constraint::Hard(_) => ConstraintLevel::Hard,
            Constraint::Soft(_) => ConstraintLevel::Soft,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Hard(c) => c.fmt(f),
            Constraint::Soft(c) => c.fmt(f),
        }
    }
}

impl From<HardConstraint> for Constraint {
    fn from(c: HardConstraint) -> Self {
        Constraint::Hard(c)
    }
}

impl From<SoftConstraint> for Constraint {
    fn from(c: SoftConstraint) -> Self {
        Constraint::Soft(c)
    }
}

/// Constraint priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintLevel {
    /// Must be satisfied for feasibility.
    Hard,
    /// Optimization preference.
    Soft,
}
