//! End-to-end seating properties.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seatforge::prelude::*;
use seatforge::{ClassroomConfig, StudentId};
use seatforge_test::{scenario_a, scenario_b, scenario_c, scenario_chain, scenario_d, student_ids};

/// A mixed classroom: spread-out scores, a few separations, zone wishes.
fn busy_classroom() -> SeatingProblem {
    let ids = student_ids(23);
    let mut matrix = CompatibilityMatrix::new();
    for (i, a) in ids.iter().enumerate() {
        for (j, b) in ids.iter().enumerate().skip(i + 1) {
            let score = ((i * 7 + j * 13) % 11).min(10) as f64;
            matrix.insert(a.as_str().into(), b.as_str().into(), score).unwrap();
        }
    }

    let roster = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let student = Student::new(id.as_str());
            if i % 5 == 0 {
                student.with_preference("front")
            } else {
                student
            }
        })
        .collect();

    let mut desks = Vec::new();
    for i in 0..10 {
        let desk = DeskSlot::pair(format!("p{i:02}"));
        desks.push(if i < 3 { desk.with_zone("front") } else { desk });
    }
    desks.push(DeskSlot::single("s00").with_zone("front"));
    desks.push(DeskSlot::single("s01"));
    desks.push(DeskSlot::single("s02"));

    SeatingProblem::new(roster, DeskLayout::new(desks))
        .with_matrix(matrix)
        .with_constraint(Constraint::must_separate("s01", "s02"))
        .with_constraint(Constraint::must_separate("s03", "s10"))
        .with_constraint(Constraint::must_separate("s04", "s05"))
        .with_constraint(Constraint::prefers_zone("s07", "front", 3.0))
}

fn assert_complete_and_within_capacity(problem: &SeatingProblem, assignment: &Assignment) {
    let mut seen: HashMap<&StudentId, usize> = HashMap::new();
    for seating in assignment.iter() {
        let desk = problem
            .layout
            .get(&seating.desk)
            .expect("assignment only uses layout desks");
        assert!(seating.occupants.len() <= desk.capacity as usize);
        for student in &seating.occupants {
            *seen.entry(student).or_default() += 1;
        }
    }
    assert_eq!(seen.len(), problem.roster.len());
    for student in &problem.roster {
        assert_eq!(seen.get(&student.id), Some(&1), "{} seated once", student.id);
    }
}

#[test]
fn test_completeness_and_capacity() {
    for problem in [scenario_a(), scenario_b(), scenario_c(), scenario_d(), busy_classroom()] {
        let outcome = seatforge::solve(&problem).unwrap();
        assert_complete_and_within_capacity(&problem, &outcome.assignment);
        assert_eq!(outcome.report.structural_violations().count(), 0);
    }
}

#[test]
fn test_separations_honoured_when_feasible() {
    let problem = busy_classroom();
    let outcome = seatforge::solve(&problem).unwrap();

    for (a, b) in [("s01", "s02"), ("s03", "s10"), ("s04", "s05")] {
        assert!(!outcome.assignment.share_desk(&a.into(), &b.into()));
    }
    assert!(outcome.report.feasible);
    assert!(outcome.report.is_clean());
}

#[test]
fn test_chain_seated_without_violations() {
    let problem = scenario_chain();
    let outcome = seatforge::solve(&problem).unwrap();

    for (a, b) in [("s", "a"), ("b", "c"), ("d", "t")] {
        assert!(outcome.assignment.share_desk(&a.into(), &b.into()), "{a} sits with {b}");
    }
    assert_eq!(outcome.metrics.pair_score_sum, 3.0);
    assert!(outcome.report.is_clean());
}

/// Random small classroom with dense separations.
fn random_classroom(rng: &mut StdRng) -> (SeatingProblem, Vec<Vec<bool>>) {
    let n: usize = rng.random_range(2..=9);
    let pair_desks = rng.random_range(0..=n / 2 + 1);
    let single_desks = n.saturating_sub(2 * pair_desks) + rng.random_range(0..=1);
    let ids = student_ids(n);

    let mut legal = vec![vec![false; n]; n];
    let mut matrix = CompatibilityMatrix::new();
    let mut constraints = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random_bool(0.3) {
                let score = rng.random_range(0..=10) as f64;
                matrix.insert(ids[i].as_str().into(), ids[j].as_str().into(), score).unwrap();
            }
            if rng.random_bool(0.5) {
                constraints.push(Constraint::must_separate(ids[i].as_str(), ids[j].as_str()));
            } else {
                legal[i][j] = true;
                legal[j][i] = true;
            }
        }
    }

    let roster = ids.iter().map(|id| Student::new(id.as_str())).collect();
    let problem = SeatingProblem::new(roster, DeskLayout::uniform(pair_desks, single_desks))
        .with_matrix(matrix)
        .with_constraints(constraints);
    (problem, legal)
}

/// Size of the largest set of disjoint legal pairs among the students in `mask`.
fn max_legal_pairs(legal: &[Vec<bool>], mask: u32) -> usize {
    if mask == 0 {
        return 0;
    }
    let first = mask.trailing_zeros() as usize;
    let rest = mask & !(1 << first);
    let mut best = max_legal_pairs(legal, rest);
    for other in 0..legal.len() {
        if rest & (1 << other) != 0 && legal[first][other] {
            best = best.max(1 + max_legal_pairs(legal, rest & !(1 << other)));
        }
    }
    best
}

#[test]
fn test_separations_honoured_whenever_a_legal_seating_exists() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..300 {
        let (problem, legal) = random_classroom(&mut rng);
        let n = problem.roster.len();
        // A legal seating needs enough legal pairs to fit everyone else on a desk.
        let needed_pairs = n.saturating_sub(problem.layout.len());
        let feasible = max_legal_pairs(&legal, (1u32 << n) - 1) >= needed_pairs;

        let outcome = seatforge::solve(&problem).unwrap();
        assert_complete_and_within_capacity(&problem, &outcome.assignment);
        assert_eq!(
            outcome.report.feasible, feasible,
            "round {round}: {n} students, {} desks, {:?}",
            problem.layout.len(),
            outcome.report.violations
        );
    }
}

#[test]
fn test_matrix_symmetry() {
    let problem = busy_classroom();
    for a in &problem.roster {
        for b in &problem.roster {
            assert_eq!(
                problem.matrix.score(&a.id, &b.id),
                problem.matrix.score(&b.id, &a.id)
            );
        }
    }
}

#[test]
fn test_reference_scenarios() {
    let a = seatforge::solve(&scenario_a()).unwrap();
    assert_eq!(a.metrics.pair_count, 15);
    assert_eq!(a.metrics.single_count, 1);
    assert_eq!(a.metrics.average_pair_score, seatforge::NEUTRAL_SCORE);

    let b = seatforge::solve(&scenario_b()).unwrap();
    assert_eq!(b.metrics.pair_score_sum, 18.0);

    let c = seatforge::solve(&scenario_c()).unwrap();
    assert!(!c.assignment.share_desk(&"A".into(), &"B".into()));
    assert!(c.metrics.pair_score_sum < b.metrics.pair_score_sum);
    assert!(c.report.violations.is_empty());

    let d = seatforge::solve(&scenario_d()).unwrap();
    assert!(!d.report.violations.is_empty());
    assert!(!d.report.feasible);
}

#[test]
fn test_byte_identical_output() {
    let problem = busy_classroom();
    let first = seatforge::solve(&problem).unwrap();
    let second = seatforge::solve(&problem).unwrap();

    let render = |o: &SeatingOutcome| {
        (
            serde_json::to_string(&o.assignment).unwrap(),
            serde_json::to_string(&o.metrics).unwrap(),
            serde_json::to_string(&o.report).unwrap(),
            serde_json::to_string(&o.diagnostics).unwrap(),
        )
    };
    assert_eq!(render(&first), render(&second));
    assert_eq!(format!("{:?}", first.assignment), format!("{:?}", second.assignment));
}

#[test]
fn test_capacity_and_validation_errors() {
    let problem = SeatingProblem::new(
        vec![Student::new("a"), Student::new("b"), Student::new("c")],
        DeskLayout::uniform(1, 0),
    );
    let err = seatforge::solve(&problem).unwrap_err();
    assert!(err.is_capacity());

    let problem = SeatingProblem::new(
        vec![Student::new("a"), Student::new("b")],
        DeskLayout::new(vec![DeskSlot::new("wide", 3)]),
    );
    let err = seatforge::solve(&problem).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_classroom_config_end_to_end() {
    let config = ClassroomConfig::from_toml_str(
        r#"
        [[desks]]
        id = "window"
        capacity = 2
        zones = ["window"]

        [[desks]]
        id = "door"
        capacity = 2

        [[students]]
        id = "ana"
        preferences = ["window"]

        [[students]]
        id = "ben"

        [[students]]
        id = "cy"

        [[students]]
        id = "dee"

        [[scores]]
        a = "ana"
        b = "ben"
        score = 9.0

        [[scores]]
        a = "cy"
        b = "dee"
        score = 8.0

        [[constraints]]
        type = "must_separate"
        a = "ana"
        b = "cy"
        "#,
    )
    .unwrap();
    let problem = config.into_problem().unwrap();
    let outcome = seatforge::solve(&problem).unwrap();

    assert!(outcome.assignment.share_desk(&"ana".into(), &"ben".into()));
    assert_eq!(outcome.assignment.desk_of(&"ana".into()).map(|d| d.as_str()), Some("window"));
    assert_eq!(outcome.metrics.soft_penalty_total, 0.0);
    assert!(outcome.report.is_clean());
}

#[test]
fn test_outcome_serializes_for_sinks() {
    let outcome = seatforge::solve(&scenario_d()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&outcome.report).unwrap();

    assert_eq!(json["feasible"], serde_json::Value::Bool(false));
    assert_eq!(json["partial"], serde_json::Value::Bool(false));
    assert_eq!(json["violations"][0]["kind"], "hard_constraint");
}
