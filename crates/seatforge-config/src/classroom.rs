//! Classroom definitions loaded from configuration files.
//!
//! A classroom file describes one fixed desk layout together with the roster,
//! compatibility scores and constraints to solve it with:
//!
//! ```toml
//! [[desks]]
//! id = "front-left"
//! capacity = 2
//! zones = ["near-window"]
//!
//! [[students]]
//! id = "s01"
//! name = "Ada"
//! preferences = ["quiet"]
//!
//! [[scores]]
//! a = "s01"
//! b = "s02"
//! score = 8.5
//!
//! [[constraints]]
//! type = "must_separate"
//! a = "s01"
//! b = "s03"
//!
//! [[constraints]]
//! type = "prefers_zone"
//! student = "s02"
//! zone = "quiet"
//! weight = 2.0
//! ```

use std::path::Path;

use seatforge_core::domain::{DeskLayout, DeskSlot, SeatingProblem, Student};
use seatforge_core::{CompatibilityMatrix, Constraint};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A complete classroom: layout, roster, scores and constraints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassroomConfig {
    /// Desks in layout order.
    #[serde(default)]
    pub desks: Vec<DeskConfig>,

    /// Roster in input order.
    #[serde(default)]
    pub students: Vec<StudentConfig>,

    /// Sparse pairwise compatibility scores.
    #[serde(default)]
    pub scores: Vec<ScoreEntryConfig>,

    /// Hard and soft constraints.
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

/// One desk slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeskConfig {
    pub id: String,
    pub capacity: u8,
    #[serde(default)]
    pub zones: Vec<String>,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StudentConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// One compatibility score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreEntryConfig {
    pub a: String,
    pub b: String,
    pub score: f64,
}

/// Constraint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    /// Two students may not share a desk.
    MustSeparate { a: String, b: String },

    /// A student should sit in a zone.
    PrefersZone {
        student: String,
        zone: String,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

fn default_weight() -> f64 {
    crate::DEFAULT_ZONE_WEIGHT
}

impl ClassroomConfig {
    /// Loads a classroom from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a classroom from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a classroom from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a classroom from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Builds the desk layout.
    pub fn layout(&self) -> DeskLayout {
        DeskLayout::new(
            self.desks
                .iter()
                .map(|d| {
                    d.zones
                        .iter()
                        .fold(DeskSlot::new(d.id.as_str(), d.capacity), |desk, zone| {
                            desk.with_zone(zone.as_str())
                        })
                })
                .collect(),
        )
    }

    /// Converts the file into a seating problem.
    ///
    /// # Errors
    ///
    /// Fails if a score is out of range or conflicts with an earlier entry.
    /// Full input validation happens when the problem is solved.
    pub fn to_problem(&self) -> Result<SeatingProblem, ConfigError> {
        let roster = self
            .students
            .iter()
            .map(|s| {
                let student = s
                    .preferences
                    .iter()
                    .fold(Student::new(s.id.as_str()), |student, zone| {
                        student.with_preference(zone.as_str())
                    });
                match &s.name {
                    Some(name) => student.with_name(name.as_str()),
                    None => student,
                }
            })
            .collect();

        let matrix = CompatibilityMatrix::from_pairs(
            self.scores
                .iter()
                .map(|e| (e.a.as_str(), e.b.as_str(), e.score)),
        )?;

        let constraints = self.constraints.iter().map(|c| match c {
            ConstraintConfig::MustSeparate { a, b } => {
                Constraint::must_separate(a.as_str(), b.as_str())
            }
            ConstraintConfig::PrefersZone {
                student,
                zone,
                weight,
            } => Constraint::prefers_zone(student.as_str(), zone.as_str(), *weight),
        });

        Ok(SeatingProblem::new(roster, self.layout())
            .with_matrix(matrix)
            .with_constraints(constraints))
    }

    /// Consumes the file and converts it into a seating problem.
    pub fn into_problem(self) -> Result<SeatingProblem, ConfigError> {
        self.to_problem()
    }
}
