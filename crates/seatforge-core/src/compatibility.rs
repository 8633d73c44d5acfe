//! Pairwise compatibility scores.
//!
//! The matrix is an opaque read-only oracle: `score(a, b)` is total, symmetric
//! and O(1). Pairs that were never supplied return the neutral score.

use std::collections::HashMap;

use crate::domain::StudentId;
use crate::error::{Result, SeatForgeError};

/// Lowest valid compatibility score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid compatibility score.
pub const MAX_SCORE: f64 = 10.0;

/// Score used for pairs missing from the matrix.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Unordered pair of students, normalized so that `first() <= second()`.
///
/// # Example
///
/// ```
/// use seatforge_core::StudentPair;
///
/// let ab = StudentPair::new("b".into(), "a".into());
/// assert_eq!(ab.first().as_str(), "a");
/// assert_eq!(ab, StudentPair::new("a".into(), "b".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentPair {
    first: StudentId,
    second: StudentId,
}

impl StudentPair {
    pub fn new(a: StudentId, b: StudentId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &StudentId {
        &self.first
    }

    pub fn second(&self) -> &StudentId {
        &self.second
    }

    pub fn contains(&self, student: &StudentId) -> bool {
        &self.first == student || &self.second == student
    }

    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

/// Symmetric mapping from unordered student pairs to a score in `[0, 10]`.
///
/// # Example
///
/// ```
/// use seatforge_core::{CompatibilityMatrix, NEUTRAL_SCORE};
///
/// let matrix = CompatibilityMatrix::from_pairs([
///     ("a", "b", 9.0),
///     ("b", "a", 9.0), // repeated with the same value is fine
/// ])
/// .unwrap();
///
/// assert_eq!(matrix.score(&"a".into(), &"b".into()), 9.0);
/// assert_eq!(matrix.score(&"b".into(), &"a".into()), 9.0);
/// assert_eq!(matrix.score(&"a".into(), &"c".into()), NEUTRAL_SCORE);
///
/// assert!(CompatibilityMatrix::from_pairs([("a", "b", 11.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityMatrix {
    scores: HashMap<StudentPair, f64>,
    default_score: f64,
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityMatrix {
    /// Creates an empty matrix where every pair is neutral.
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            default_score: NEUTRAL_SCORE,
        }
    }

    /// Builds a matrix from raw `(a, b, score)` triples.
    ///
    /// # Errors
    ///
    /// Fails if a score is outside `[0, 10]`, a pair relates a student to
    /// itself, or the same pair is listed twice with different values.
    pub fn from_pairs<I, A, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B, f64)>,
        A: Into<StudentId>,
        B: Into<StudentId>,
    {
        let mut matrix = Self::new();
        for (a, b, score) in pairs {
            matrix.insert(a.into(), b.into(), score)?;
        }
        Ok(matrix)
    }

    /// Replaces the score returned for missing pairs.
    ///
    /// # Errors
    ///
    /// Fails if `score` is outside `[0, 10]`.
    pub fn with_default_score(mut self, score: f64) -> Result<Self> {
        if !is_valid_score(score) {
            return Err(SeatForgeError::Config(format!(
                "neutral score {score} is outside [{MIN_SCORE}, {MAX_SCORE}]"
            )));
        }
        self.default_score = score;
        Ok(self)
    }

    /// Adds one pair score.
    pub fn insert(&mut self, a: StudentId, b: StudentId, score: f64) -> Result<()> {
        if !is_valid_score(score) {
            return Err(SeatForgeError::ScoreOutOfRange { a, b, score });
        }
        let pair = StudentPair::new(a, b);
        if pair.is_self_pair() {
            return Err(SeatForgeError::SelfPair(pair.first));
        }
        if let Some(&existing) = self.scores.get(&pair) {
            if existing != score {
                return Err(SeatForgeError::ConflictingScore {
                    a: pair.first,
                    b: pair.second,
                    first: existing,
                    second: score,
                });
            }
            return Ok(());
        }
        self.scores.insert(pair, score);
        Ok(())
    }

    /// Compatibility of `a` and `b`; neutral if the pair was never supplied.
    #[inline]
    pub fn score(&self, a: &StudentId, b: &StudentId) -> f64 {
        // Key construction clones the ids; the solver uses a dense copy instead.
        let pair = StudentPair::new(a.clone(), b.clone());
        self.scores
            .get(&pair)
            .copied()
            .unwrap_or(self.default_score)
    }

    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Number of explicitly supplied pairs.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Explicit pairs in ascending pair order.
    pub fn explicit_pairs(&self) -> Vec<(&StudentPair, f64)> {
        let mut pairs: Vec<_> = self.scores.iter().map(|(p, s)| (p, *s)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

fn is_valid_score(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}
