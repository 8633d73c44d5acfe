//! SeatingScore - two-level score used to compare candidate seatings

use std::cmp::Ordering;
use std::fmt;

/// A score with a hard level (negated violation count) and a soft level
/// (pair compatibility minus zone penalty).
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// Soft values are compared with [`f64::total_cmp`], so the ordering is total
/// and deterministic.
///
/// # Examples
///
/// ```
/// use seatforge_scoring::SeatingScore;
///
/// let infeasible = SeatingScore::of(-1, 40.0);
/// let feasible = SeatingScore::of(0, 12.0);
/// assert!(feasible > infeasible);
///
/// assert!(SeatingScore::of(0, 13.5) > feasible);
/// assert_eq!(feasible.to_string(), "0hard/12soft");
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingScore {
    hard: i64,
    soft: f64,
}

impl SeatingScore {
    /// The zero score.
    pub const ZERO: SeatingScore = SeatingScore { hard: 0, soft: 0.0 };

    #[inline]
    pub const fn of(hard: i64, soft: f64) -> Self {
        SeatingScore { hard, soft }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn soft(&self) -> f64 {
        self.soft
    }

    /// Feasible when no hard constraint is broken.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl PartialEq for SeatingScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SeatingScore {}

impl Ord for SeatingScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then_with(|| self.soft.total_cmp(&other.soft))
    }
}

impl PartialOrd for SeatingScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SeatingScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}
