//! Reference scenarios.
//!
//! | Scenario | Setup | Expected |
//! |----------|-------|----------|
//! | A | 31 students, 15 two-seat + 1 one-seat desk, neutral scores | 15 pairs, 1 single, average = neutral |
//! | B | A..D, two 2-seat desks, AB = CD = 9, others 2 | {A,B} {C,D}, sum 18 |
//! | C | B plus `MustSeparate(A, B)` | no {A,B}, sum < 18, no violations |
//! | D | 4 mutually separated students, two 2-seat desks | at least one violation |
//! | Chain | s, a, b, c, d, t; only neighbours on the chain s-a-b-c-d-t may sit together; ab = cd = 10, other links 1; three 2-seat desks | {s,a} {b,c} {d,t}, no violations |

use seatforge_core::domain::{DeskLayout, SeatingProblem};
use seatforge_core::{CompatibilityMatrix, Constraint};

use crate::classroom::{roster, uniform_classroom};

pub fn scenario_a() -> SeatingProblem {
    uniform_classroom(31, 15, 1)
}

pub fn scenario_b() -> SeatingProblem {
    let matrix = CompatibilityMatrix::from_pairs([
        ("A", "B", 9.0),
        ("A", "C", 2.0),
        ("A", "D", 2.0),
        ("B", "C", 2.0),
        ("B", "D", 2.0),
        ("C", "D", 9.0),
    ])
    .expect("scenario B scores are in range");
    SeatingProblem::new(roster(&["A", "B", "C", "D"]), DeskLayout::uniform(2, 0))
        .with_matrix(matrix)
}

pub fn scenario_c() -> SeatingProblem {
    scenario_b().with_constraint(Constraint::must_separate("A", "B"))
}

pub fn scenario_d() -> SeatingProblem {
    let ids = ["A", "B", "C", "D"];
    let mut problem = SeatingProblem::new(roster(&ids), DeskLayout::uniform(2, 0));
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            problem = problem.with_constraint(Constraint::must_separate(*a, *b));
        }
    }
    problem
}

/// Greedy takes the two 10-point links; only re-pairing the whole chain
/// seats everyone legally.
pub fn scenario_chain() -> SeatingProblem {
    let chain = ["s", "a", "b", "c", "d", "t"];
    let matrix = CompatibilityMatrix::from_pairs([
        ("s", "a", 1.0),
        ("a", "b", 10.0),
        ("b", "c", 1.0),
        ("c", "d", 10.0),
        ("d", "t", 1.0),
    ])
    .expect("chain scores are in range");

    let mut problem =
        SeatingProblem::new(roster(&chain), DeskLayout::uniform(3, 0)).with_matrix(matrix);
    for (i, a) in chain.iter().enumerate() {
        for b in chain.iter().skip(i + 2) {
            problem = problem.with_constraint(Constraint::must_separate(*a, *b));
        }
    }
    problem
}
