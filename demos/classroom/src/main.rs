//! Classroom Seating Example
//!
//! Loads a classroom (desks, roster, compatibility scores and rules) from a
//! TOML file, seats it, and prints the seating map with its report.
//!
//! Usage: `classroom [classroom.toml] [solver.toml]`

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;

use seatforge::prelude::*;
use seatforge::{ClassroomConfig, StudentId};

const DEFAULT_CLASSROOM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/classroom.toml");

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let classroom_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLASSROOM));
    let config = match args.next() {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    let problem = ClassroomConfig::from_toml_file(&classroom_path)?.into_problem()?;
    let outcome = solve_with_config(&problem, &config)?;

    print_map(&problem, &outcome);
    print_report(&outcome);
    Ok(())
}

fn print_map(problem: &SeatingProblem, outcome: &SeatingOutcome) {
    let names: HashMap<&StudentId, &str> = problem
        .roster
        .iter()
        .map(|s| (&s.id, s.display_name()))
        .collect();

    println!("\nSeating map:");
    println!("{}", "-".repeat(48));
    for seating in outcome.assignment.iter() {
        let occupants: Vec<&str> = seating
            .occupants
            .iter()
            .map(|id| names.get(id).copied().unwrap_or(id.as_str()))
            .collect();
        let occupants = if occupants.is_empty() {
            "(empty)".to_string()
        } else {
            occupants.join(" + ")
        };
        println!("{:<12} {}", seating.desk.as_str(), occupants);
    }
    println!("{}", "-".repeat(48));
}

fn print_report(outcome: &SeatingOutcome) {
    let metrics = &outcome.metrics;
    println!(
        "pairs: {}  singles: {}  pair score: {:.1} (avg {:.2})  zone penalty: {:.1}",
        metrics.pair_count,
        metrics.single_count,
        metrics.pair_score_sum,
        metrics.average_pair_score,
        metrics.soft_penalty_total
    );
    println!(
        "steps: {}  moves evaluated: {}  moves accepted: {}",
        outcome.stats.step_count, outcome.stats.moves_evaluated, outcome.stats.moves_accepted
    );

    for diagnostic in &outcome.diagnostics {
        println!("note: {}", diagnostic);
    }

    if outcome.report.is_clean() {
        println!("All rules satisfied.");
        return;
    }
    if outcome.report.partial {
        println!("Stopped early: this seating is the best found so far.");
    }
    for violation in &outcome.report.violations {
        println!("VIOLATION: {}", violation);
    }
}
