//! Tests for the compatibility matrix

use super::compatibility::*;
use super::error::SeatForgeError;
use super::StudentId;

fn id(s: &str) -> StudentId {
    StudentId::new(s)
}

#[test]
fn test_score_is_symmetric() {
    let matrix =
        CompatibilityMatrix::from_pairs([("a", "b", 9.0), ("c", "a", 2.5), ("b", "c", 0.0)])
            .unwrap();

    for (x, y) in [("a", "b"), ("a", "c"), ("b", "c")] {
        assert_eq!(matrix.score(&id(x), &id(y)), matrix.score(&id(y), &id(x)));
    }
    assert_eq!(matrix.score(&id("c"), &id("a")), 2.5);
}

#[test]
fn test_missing_pair_is_neutral() {
    let matrix = CompatibilityMatrix::from_pairs([("a", "b", 1.0)]).unwrap();
    assert_eq!(matrix.score(&id("a"), &id("z")), NEUTRAL_SCORE);
}

#[test]
fn test_custom_default_score() {
    let matrix = CompatibilityMatrix::new().with_default_score(3.0).unwrap();
    assert_eq!(matrix.score(&id("a"), &id("b")), 3.0);
    assert!(CompatibilityMatrix::new().with_default_score(-1.0).is_err());
}

#[test]
fn test_bounds_are_inclusive() {
    assert!(CompatibilityMatrix::from_pairs([("a", "b", MIN_SCORE)]).is_ok());
    assert!(CompatibilityMatrix::from_pairs([("a", "b", MAX_SCORE)]).is_ok());
}

#[test]
fn test_out_of_range_rejected() {
    let err = CompatibilityMatrix::from_pairs([("a", "b", 10.5)]).unwrap_err();
    assert!(matches!(&err, SeatForgeError::ScoreOutOfRange { score, .. } if *score == 10.5));
    assert!(err.is_validation());

    assert!(CompatibilityMatrix::from_pairs([("a", "b", -0.1)]).is_err());
    assert!(CompatibilityMatrix::from_pairs([("a", "b", f64::NAN)]).is_err());
}

#[test]
fn test_conflicting_duplicate_rejected() {
    let err = CompatibilityMatrix::from_pairs([("a", "b", 4.0), ("b", "a", 6.0)]).unwrap_err();
    assert!(matches!(err, SeatForgeError::ConflictingScore { first, second, .. }
        if first == 4.0 && second == 6.0));
}

#[test]
fn test_consistent_duplicate_accepted() {
    let matrix = CompatibilityMatrix::from_pairs([("a", "b", 4.0), ("b", "a", 4.0)]).unwrap();
    assert_eq!(matrix.len(), 1);
}

#[test]
fn test_self_pair_rejected() {
    let err = CompatibilityMatrix::from_pairs([("a", "a", 4.0)]).unwrap_err();
    assert_eq!(err, SeatForgeError::SelfPair(id("a")));
}

#[test]
fn test_explicit_pairs_sorted() {
    let matrix =
        CompatibilityMatrix::from_pairs([("d", "c", 1.0), ("b", "a", 2.0), ("c", "a", 3.0)])
            .unwrap();
    let firsts: Vec<_> = matrix
        .explicit_pairs()
        .iter()
        .map(|(p, _)| format!("{}{}", p.first(), p.second()))
        .collect();
    assert_eq!(firsts, vec!["ab", "ac", "cd"]);
}
