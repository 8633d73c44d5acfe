//! Tests for the pairing and placement phases.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use seatforge_core::domain::{DeskLayout, DeskSlot, SeatingProblem, Student, StudentId};
use seatforge_core::{CompatibilityMatrix, Constraint};
use seatforge_scoring::{ConstraintModel, ScoreEvaluator};
use seatforge_test::{
    roster, scenario_a, scenario_b, scenario_c, scenario_chain, scenario_d, uniform_classroom,
};

use super::*;
use crate::diagnostic::Diagnostic;
use crate::indexed::IndexedProblem;
use crate::scope::SolverScope;
use crate::test_utils::{index_of, indexed};

fn run_pairing(problem: &IndexedProblem) -> (Pairing, Vec<Diagnostic>) {
    let mut scope = SolverScope::new(problem);
    PairingPhase::new(50).solve(&mut scope);
    let pairing = scope.pairing().clone();
    let (_, diagnostics, _) = scope.into_parts();
    (pairing, diagnostics)
}

fn pair_ids(problem: &IndexedProblem, pairing: &Pairing) -> Vec<(String, String)> {
    pairing
        .pairs()
        .iter()
        .map(|&(a, b)| {
            (
                problem.student(a).as_str().to_string(),
                problem.student(b).as_str().to_string(),
            )
        })
        .collect()
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

#[test]
fn test_pairing_picks_best_pairs() {
    let problem = indexed(&scenario_b());
    let (pairing, diagnostics) = run_pairing(&problem);

    assert_eq!(pair_ids(&problem, &pairing), vec![pair("A", "B"), pair("C", "D")]);
    assert!(pairing.singles().is_empty());
    assert_eq!(pairing.pair_score(&problem), 18.0);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_pairing_respects_must_separate() {
    let problem = indexed(&scenario_c());
    let (pairing, diagnostics) = run_pairing(&problem);

    let pairs = pair_ids(&problem, &pairing);
    assert_eq!(pairs.len(), 2);
    assert!(!pairs.contains(&pair("A", "B")));
    assert_eq!(pairing.violation_count(&problem), 0);
    assert!(pairing.pair_score(&problem) < 18.0);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_pairing_odd_roster_leaves_one_single() {
    let problem = indexed(&scenario_a());
    let (pairing, _) = run_pairing(&problem);

    assert_eq!(pairing.pairs().len(), 15);
    assert_eq!(pairing.singles().len(), 1);
    // All scores tie, so the lowest id sits alone.
    assert_eq!(problem.student(pairing.singles()[0]).as_str(), "s01");
}

#[test]
fn test_single_is_least_compatible_student() {
    let matrix = CompatibilityMatrix::from_pairs([
        ("a", "b", 8.0),
        ("a", "c", 7.0),
        ("b", "c", 9.0),
        ("a", "z", 1.0),
        ("b", "z", 1.0),
        ("c", "z", 2.0),
    ])
    .unwrap();
    let problem = SeatingProblem::new(roster(&["a", "b", "c", "z"]), DeskLayout::uniform(1, 2))
        .with_matrix(matrix);
    let problem = indexed(&problem);
    let (pairing, _) = run_pairing(&problem);

    assert_eq!(pair_ids(&problem, &pairing), vec![pair("b", "c")]);
    let singles: Vec<&str> = pairing
        .singles()
        .iter()
        .map(|&s| problem.student(s).as_str())
        .collect();
    assert_eq!(singles, vec!["a", "z"]);
}

#[test]
fn test_pairing_degrades_and_forces_when_all_separated() {
    let problem = indexed(&scenario_d());
    let (pairing, diagnostics) = run_pairing(&problem);

    assert_eq!(pair_ids(&problem, &pairing), vec![pair("A", "B"), pair("C", "D")]);
    assert_eq!(pairing.violation_count(&problem), 2);
    assert_eq!(diagnostics[0], Diagnostic::PairingDegraded { students: 4 });
    let forced = diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::ForcedPairing { .. }))
        .count();
    assert_eq!(forced, 2);
}

#[test]
fn test_degraded_pairing_with_enough_desks_stays_single() {
    let ids = ["A", "B", "C"];
    let mut problem = SeatingProblem::new(roster(&ids), DeskLayout::uniform(2, 1));
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            problem = problem.with_constraint(Constraint::must_separate(*a, *b));
        }
    }
    let problem = indexed(&problem);
    let (pairing, diagnostics) = run_pairing(&problem);

    assert!(pairing.pairs().is_empty());
    assert_eq!(pairing.singles().len(), 3);
    assert_eq!(diagnostics, vec![Diagnostic::PairingDegraded { students: 3 }]);
}

#[test]
fn test_join_through_pair_avoids_forced_violation() {
    // Greedy takes C-D first; A and B can then only be seated by splitting it.
    let problem = indexed(&scenario_c());
    let a = index_of(&problem, "A");
    let b = index_of(&problem, "B");
    let c = index_of(&problem, "C");
    let d = index_of(&problem, "D");
    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(0).solve(&mut scope);

    let pairs = scope.pairing().pairs().to_vec();
    assert_eq!(pairs, vec![(a, c), (b, d)]);
    assert_eq!(scope.pairing().violation_count(&problem), 0);
}

#[test]
fn test_chain_repairing_avoids_forced_violation() {
    // Greedy seats a-b and c-d; s and t can only be seated legally by
    // re-pairing the whole chain.
    let problem = indexed(&scenario_chain());
    let (pairing, diagnostics) = run_pairing(&problem);

    assert_eq!(
        pair_ids(&problem, &pairing),
        vec![pair("a", "s"), pair("b", "c"), pair("d", "t")]
    );
    assert!(pairing.singles().is_empty());
    assert_eq!(pairing.violation_count(&problem), 0);
    assert_eq!(pairing.pair_score(&problem), 3.0);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_chain_repairing_happens_before_cancellation_check() {
    let problem = indexed(&scenario_chain());
    let mut scope = SolverScope::new(&problem);
    scope.set_terminate_early_flag(Arc::new(AtomicBool::new(true)));
    PairingPhase::new(50).solve(&mut scope);

    assert!(scope.is_interrupted());
    assert_eq!(scope.pairing().pairs().len(), 3);
    assert_eq!(scope.pairing().violation_count(&problem), 0);
}

#[test]
fn test_chain_with_two_pair_desks_keeps_best_pairs() {
    // Chain of six with only two pair desks and two singles: the matching
    // has three pairs, the layout takes two.
    let base = scenario_chain();
    let problem = SeatingProblem::new(base.roster.clone(), DeskLayout::uniform(2, 2))
        .with_matrix(base.matrix.clone())
        .with_constraints(base.constraints.clone());
    let problem = indexed(&problem);
    let (pairing, diagnostics) = run_pairing(&problem);

    assert_eq!(pairing.pairs().len(), 2);
    assert_eq!(pairing.singles().len(), 2);
    assert_eq!(pairing.violation_count(&problem), 0);
    assert_eq!(pairing.pair_score(&problem), 20.0);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_improvement_repairs_greedy_choice() {
    // Greedy commits b-c (9) and leaves a-d (0); a-b + c-d scores 16.
    let matrix = CompatibilityMatrix::from_pairs([
        ("a", "b", 8.0),
        ("a", "c", 0.0),
        ("a", "d", 0.0),
        ("b", "c", 9.0),
        ("b", "d", 0.0),
        ("c", "d", 8.0),
    ])
    .unwrap();
    let problem = SeatingProblem::new(roster(&["a", "b", "c", "d"]), DeskLayout::uniform(2, 0))
        .with_matrix(matrix);
    let problem = indexed(&problem);

    let (improved, _) = run_pairing(&problem);
    assert_eq!(pair_ids(&problem, &improved), vec![pair("a", "b"), pair("c", "d")]);
    assert_eq!(improved.pair_score(&problem), 16.0);

    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(0).solve(&mut scope);
    assert_eq!(scope.pairing().pair_score(&problem), 9.0);
}

#[test]
fn test_cancelled_pairing_is_still_complete() {
    let problem = indexed(&scenario_d());
    let mut scope = SolverScope::new(&problem);
    scope.set_terminate_early_flag(Arc::new(AtomicBool::new(true)));
    PairingPhase::new(50).solve(&mut scope);

    let pairing = scope.pairing();
    assert_eq!(pairing.pairs().len() * 2 + pairing.singles().len(), 4);
    assert!(scope.is_interrupted());
}

#[test]
fn test_placement_puts_singles_on_single_desks() {
    let problem = indexed(&uniform_classroom(5, 3, 1));
    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(50).solve(&mut scope);
    PlacementPhase::new(100).solve(&mut scope);

    let placement = scope.placement().unwrap();
    let desks = placement.desks();
    assert!(matches!(desks[0], DeskContent::Pair(_, _)));
    assert!(matches!(desks[1], DeskContent::Pair(_, _)));
    assert_eq!(desks[2], DeskContent::Empty);
    assert!(matches!(desks[3], DeskContent::Single(_)));
}

#[test]
fn test_placement_moves_students_to_preferred_zone() {
    let layout = DeskLayout::new(vec![
        DeskSlot::pair("front"),
        DeskSlot::pair("window").with_zone("near-window"),
    ]);
    let matrix = CompatibilityMatrix::from_pairs([("a", "b", 9.0), ("c", "d", 9.0)]).unwrap();
    let problem = SeatingProblem::new(
        vec![
            Student::new("a").with_preference("near-window"),
            Student::new("b").with_preference("near-window"),
            Student::new("c"),
            Student::new("d"),
        ],
        layout,
    )
    .with_matrix(matrix);
    let problem = indexed(&problem);

    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(50).solve(&mut scope);

    let constructed = Placement::construct(&problem, scope.pairing());
    assert_eq!(constructed.penalty(&problem), 2.0);

    PlacementPhase::new(100).solve(&mut scope);
    let placement = scope.placement().unwrap();
    assert_eq!(placement.penalty(&problem), 0.0);

    let assignment = placement.to_assignment(&problem);
    assert_eq!(
        assignment.occupants(&"window".into()),
        &[StudentId::from("a"), StudentId::from("b")]
    );
    assert_eq!(scope.stats().moves_accepted, 1);
}

#[test]
fn test_placement_budget_stops_swaps() {
    let problem = SeatingProblem::new(
        vec![
            Student::new("a").with_preference("quiet"),
            Student::new("b").with_preference("quiet"),
            Student::new("c"),
            Student::new("d"),
        ],
        DeskLayout::new(vec![
            DeskSlot::single("d1"),
            DeskSlot::single("d2"),
            DeskSlot::single("d3").with_zone("quiet"),
            DeskSlot::single("d4").with_zone("quiet"),
        ]),
    );
    let problem = indexed(&problem);

    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(50).solve(&mut scope);
    // Construction seats a, b, c, d on d1..d4; two swaps would fix both.
    assert_eq!(Placement::construct(&problem, scope.pairing()).penalty(&problem), 2.0);
    PlacementPhase::new(1).solve(&mut scope);

    assert_eq!(scope.placement().unwrap().penalty(&problem), 1.0);
    assert!(!scope.is_interrupted());
    let (_, diagnostics, _) = scope.into_parts();
    assert!(diagnostics.contains(&Diagnostic::IterationBudgetExhausted {
        phase: "Placement".to_string(),
        limit: 1,
    }));
}

#[test]
fn test_pair_never_lands_on_single_desk() {
    let layout = DeskLayout::new(vec![
        DeskSlot::single("quiet-single").with_zone("quiet"),
        DeskSlot::pair("loud-pair"),
    ]);
    let problem = SeatingProblem::new(
        vec![
            Student::new("a").with_preference("quiet"),
            Student::new("b").with_preference("quiet"),
        ],
        layout,
    );
    let problem = indexed(&problem);

    let mut scope = SolverScope::new(&problem);
    PairingPhase::new(50).solve(&mut scope);
    PlacementPhase::new(100).solve(&mut scope);

    let desks = scope.placement().unwrap().desks().to_vec();
    assert_eq!(desks[0], DeskContent::Empty);
    assert!(matches!(desks[1], DeskContent::Pair(_, _)));
}

#[test]
fn test_phase_penalty_matches_constraint_model() {
    let layout = DeskLayout::new(vec![
        DeskSlot::pair("front-left").with_zone("front"),
        DeskSlot::pair("back-left"),
        DeskSlot::pair("back-right").with_zone("window"),
        DeskSlot::single("front-solo").with_zone("front"),
    ]);
    let matrix = CompatibilityMatrix::from_pairs([
        ("a", "b", 9.0),
        ("c", "d", 7.5),
        ("e", "f", 6.0),
        ("a", "g", 3.0),
    ])
    .unwrap();
    let problem = SeatingProblem::new(
        vec![
            Student::new("a").with_preference("front"),
            Student::new("b"),
            Student::new("c").with_preference("window"),
            Student::new("d").with_preference("window"),
            Student::new("e"),
            Student::new("f").with_preference("front"),
            Student::new("g").with_preference("front"),
        ],
        layout,
    )
    .with_matrix(matrix)
    .with_constraint(Constraint::prefers_zone("e", "window", 0.5))
    .with_constraint(Constraint::must_separate("b", "g"));
    let model = ConstraintModel::from_problem(&problem, 1.0);
    let indexed_problem = indexed(&problem);
    let evaluator = ScoreEvaluator::new(&problem.matrix, &model, &problem.layout);

    let mut scope = SolverScope::new(&indexed_problem);
    PairingPhase::new(50).solve(&mut scope);
    let pairing = scope.pairing().clone();

    let constructed = Placement::construct(&indexed_problem, &pairing);
    let constructed_assignment = constructed.to_assignment(&indexed_problem);
    assert!(
        (constructed.penalty(&indexed_problem)
            - model.soft_penalty(&problem.layout, &constructed_assignment))
        .abs()
            < 1e-9
    );

    PlacementPhase::new(100).solve(&mut scope);
    let placement = scope.placement().unwrap();
    let assignment = placement.to_assignment(&indexed_problem);
    let metrics = evaluator.evaluate(&assignment);

    assert!(
        (placement.penalty(&indexed_problem) - model.soft_penalty(&problem.layout, &assignment))
            .abs()
            < 1e-9
    );
    assert!((placement.penalty(&indexed_problem) - metrics.soft_penalty_total).abs() < 1e-9);
    assert!((pairing.pair_score(&indexed_problem) - metrics.pair_score_sum).abs() < 1e-9);
    assert_eq!(
        pairing.violation_count(&indexed_problem),
        model.violates_hard(&assignment).len()
    );
    assert_eq!(scope.current_score(), metrics.score());
}
