//! Roster, layout and assignment builders.

use seatforge_core::domain::{Assignment, DeskId, DeskLayout, SeatingProblem, Student};

/// Generates `n` zero-padded ids: `s01`, `s02`, ...
pub fn student_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("s{i:02}")).collect()
}

/// Builds a roster with no names and no preferences.
pub fn roster(ids: &[&str]) -> Vec<Student> {
    ids.iter().map(|id| Student::new(*id)).collect()
}

/// `students` students on a layout of `pairs` two-seat and `singles` one-seat
/// desks, with an empty (all-neutral) compatibility matrix.
pub fn uniform_classroom(students: usize, pairs: usize, singles: usize) -> SeatingProblem {
    let roster = student_ids(students).into_iter().map(Student::new).collect();
    SeatingProblem::new(roster, DeskLayout::uniform(pairs, singles))
}

/// Builds an assignment over `layout` from `(desk, occupants)` rows.
pub fn assignment_of(layout: &DeskLayout, rows: &[(&str, &[&str])]) -> Assignment {
    let mut assignment = Assignment::empty(layout);
    for (desk, occupants) in rows {
        let desk = DeskId::new(*desk);
        for student in occupants.iter() {
            assignment.seat(&desk, (*student).into());
        }
    }
    assignment
}
