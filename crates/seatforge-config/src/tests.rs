//! Tests for solver and classroom configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        neutral_score = 4.5
        default_zone_weight = 2.0

        [pairing]
        improvement_pass_limit = 12

        [placement]
        max_iterations = 800

        [termination]
        step_count_limit = 5000
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.neutral_score, Some(4.5));
    assert_eq!(config.default_zone_weight, 2.0);
    assert_eq!(config.pairing.improvement_pass_limit, 12);
    assert_eq!(config.placement.max_iterations, 800);
    assert_eq!(config.step_limit(), Some(5000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        neutral_score: 6.0
        placement:
          max_iterations: 250
        termination:
          step_count_limit: 900
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.neutral_score, Some(6.0));
    assert_eq!(config.placement.max_iterations, 250);
    assert_eq!(config.pairing.improvement_pass_limit, DEFAULT_IMPROVEMENT_PASS_LIMIT);
    assert_eq!(config.step_limit(), Some(900));
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.neutral_score, None);
    assert_eq!(config.default_zone_weight, DEFAULT_ZONE_WEIGHT);
    assert_eq!(config.placement.max_iterations, DEFAULT_MAX_ITERATIONS);
    assert_eq!(config.step_limit(), None);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_max_iterations(42)
        .with_neutral_score(3.0)
        .with_default_zone_weight(0.5)
        .with_step_limit(100);

    assert_eq!(config.placement.max_iterations, 42);
    assert_eq!(config.neutral_score, Some(3.0));
    assert_eq!(config.default_zone_weight, 0.5);
    assert_eq!(config.step_limit(), Some(100));
    assert!(config.validate().is_ok());
}

#[test]
fn test_neutral_score_out_of_range_rejected() {
    let err = SolverConfig::from_toml_str("neutral_score = 11.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let config = SolverConfig::new().with_neutral_score(-0.5);
    assert!(config.validate().is_err());
}

#[test]
fn test_negative_zone_weight_rejected() {
    let err = SolverConfig::from_yaml_str("default_zone_weight: -1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let err = SolverConfig::from_toml_str("[placement\nmax_iterations = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SolverConfig::load("/nonexistent/seatforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert_eq!(
        SolverConfig::load("/nonexistent/seatforge.toml").unwrap_or_default(),
        SolverConfig::default()
    );
}

const CLASSROOM_TOML: &str = r#"
    [[desks]]
    id = "front"
    capacity = 2
    zones = ["near-window", "quiet"]

    [[desks]]
    id = "back"
    capacity = 1

    [[students]]
    id = "s01"
    name = "Ada"
    preferences = ["quiet"]

    [[students]]
    id = "s02"

    [[students]]
    id = "s03"

    [[scores]]
    a = "s01"
    b = "s02"
    score = 8.5

    [[constraints]]
    type = "must_separate"
    a = "s01"
    b = "s03"

    [[constraints]]
    type = "prefers_zone"
    student = "s02"
    zone = "near-window"
"#;

#[test]
fn test_classroom_toml_parsing() {
    let classroom = ClassroomConfig::from_toml_str(CLASSROOM_TOML).unwrap();
    assert_eq!(classroom.desks.len(), 2);
    assert_eq!(classroom.desks[0].zones, vec!["near-window", "quiet"]);
    assert!(classroom.desks[1].zones.is_empty());
    assert_eq!(classroom.students[0].name.as_deref(), Some("Ada"));
    assert_eq!(classroom.scores[0].score, 8.5);
    assert_eq!(
        classroom.constraints[1],
        ConstraintConfig::PrefersZone {
            student: "s02".to_string(),
            zone: "near-window".to_string(),
            weight: DEFAULT_ZONE_WEIGHT,
        }
    );
}

#[test]
fn test_classroom_into_problem() {
    let problem = ClassroomConfig::from_toml_str(CLASSROOM_TOML)
        .unwrap()
        .into_problem()
        .unwrap();

    assert_eq!(problem.student_count(), 3);
    assert_eq!(problem.layout.seat_count(), 3);
    assert_eq!(problem.layout.pair_desk_count(), 1);
    assert!(problem.layout.desks()[0].has_zone(&"quiet".into()));
    assert_eq!(problem.roster[0].display_name(), "Ada");
    assert!(problem.roster[0].preferences.contains(&"quiet".into()));
    assert_eq!(problem.matrix.score(&"s02".into(), &"s01".into()), 8.5);
    assert_eq!(problem.hard_constraints().count(), 1);
    assert_eq!(problem.soft_constraints().count(), 1);
    assert!(problem.validate().is_ok());
    assert!(problem.check_capacity().is_ok());
}

#[test]
fn test_classroom_yaml_parsing() {
    let yaml = r#"
        desks:
          - id: d1
            capacity: 2
        students:
          - id: a
          - id: b
        constraints:
          - type: must_separate
            a: a
            b: b
          - type: prefers_zone
            student: a
            zone: quiet
            weight: 3.0
    "#;

    let classroom = ClassroomConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
        classroom.constraints[0],
        ConstraintConfig::MustSeparate {
            a: "a".to_string(),
            b: "b".to_string(),
        }
    );
    let problem = classroom.to_problem().unwrap();
    assert_eq!(
        problem.soft_constraints().next().map(|c| c.weight()),
        Some(3.0)
    );
}

#[test]
fn test_classroom_conflicting_scores_rejected() {
    let toml = r#"
        [[scores]]
        a = "x"
        b = "y"
        score = 3.0

        [[scores]]
        a = "y"
        b = "x"
        score = 4.0
    "#;

    let err = ClassroomConfig::from_toml_str(toml)
        .unwrap()
        .to_problem()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Problem(SeatForgeError::ConflictingScore { .. })
    ));
}

#[test]
fn test_classroom_unknown_constraint_type_rejected() {
    let toml = r#"
        [[constraints]]
        type = "must_sit_together"
        a = "x"
        b = "y"
    "#;

    assert!(matches!(
        ClassroomConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}
