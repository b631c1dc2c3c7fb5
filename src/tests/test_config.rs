use std::io::Write;

use crate::config::Settings;
use crate::env::Environment;
use crate::error::GridError;
use crate::types::{CellKind, Coord};
use crate::world::TrapSpec;

const FULL: &str = r#"{
    "world": {
        "size": 5,
        "start": { "x": 0, "y": 0 },
        "end": { "x": 4, "y": 0 },
        "traps": { "mode": "fixed", "cells": [{ "x": 2, "y": 2 }, { "x": 4, "y": 0 }] }
    },
    "max_steps": 50,
    "seed": 7,
    "episodes": 20,
    "agents": {
        "policy_iteration": { "discount": 0.9, "p_obey": 0.8 },
        "q_learning": { "discount": 0.9, "p_obey": 0.9, "learning_rate": 0.5 }
    }
}"#;

#[test]
fn test_parse_full_settings() {
    let settings = Settings::from_json_str(FULL).unwrap();
    assert_eq!(settings.world.size, 5);
    assert_eq!(settings.world.end, Some(Coord::new(4, 0)));
    assert_eq!(settings.seed, 7);
    assert_eq!(settings.episodes, 20);
    assert_eq!(
        settings.trap_spec().unwrap(),
        Some(TrapSpec::Fixed { cells: vec![Coord::new(2, 2), Coord::new(4, 0)] })
    );

    let world = settings.build_world().unwrap();
    assert_eq!(world.goal(), Coord::new(4, 0));
    assert_eq!(world.cell_at(Coord::new(4, 0)), CellKind::Goal);
    assert_eq!(world.cell_at(Coord::new(2, 2)), CellKind::Trap);
}

#[test]
fn test_defaults() {
    let settings = Settings::from_json_str(
        r#"{ "world": { "size": 4, "start": { "x": 1, "y": 0 } }, "max_steps": 10 }"#,
    )
    .unwrap();
    assert_eq!(settings.seed, 1337);
    assert_eq!(settings.episodes, 0);
    assert!(settings.agents.policy_iteration.is_none());

    let env = Environment::from_settings(&settings).unwrap();
    assert_eq!(env.world().goal(), Coord::new(3, 3));
    assert_eq!(env.world().start(), Coord::new(1, 0));
    assert!(settings.q_learning_agent(&env).unwrap().is_none());
}

#[test]
fn test_agents_from_settings() {
    let settings = Settings::from_json_str(FULL).unwrap();
    let env = Environment::from_settings(&settings).unwrap();

    let planner = settings.policy_iteration_agent(&env).unwrap().unwrap();
    assert!(planner.strategy().is_converged());
    assert_eq!(planner.strategy().p_obey(), 0.8);

    let learner = settings.q_learning_agent(&env).unwrap().unwrap();
    assert_eq!(learner.strategy().learning_rate(), 0.5);
    assert_eq!(learner.position(), Coord::new(0, 0));
}

#[test]
fn test_invalid_hyperparameters_fail_when_building_agents() {
    let json = FULL.replace(r#""learning_rate": 0.5"#, r#""learning_rate": -0.5"#);
    let settings = Settings::from_json_str(&json).unwrap();
    let env = Environment::from_settings(&settings).unwrap();
    assert!(settings.q_learning_agent(&env).is_err());
}

#[test]
fn test_unsupported_trap_mode_is_a_configuration_error() {
    let json = FULL.replace(r#""mode": "fixed""#, r#""mode": "maze""#);
    let err = Settings::from_json_str(&json).unwrap_err();
    assert!(matches!(err, GridError::InvalidTrapSpec(_)));
    assert!(err.is_configuration());
}

#[test]
fn test_out_of_grid_start_is_rejected() {
    let err = Settings::from_json_str(
        r#"{ "world": { "size": 4, "start": { "x": 4, "y": 0 } }, "max_steps": 10 }"#,
    )
    .unwrap_err();
    assert_eq!(err, GridError::InvalidCoordinate { x: 4, y: 0, size: 4 });
}

#[test]
fn test_malformed_json() {
    let err = Settings::from_json_str("{ \"world\": ").unwrap_err();
    assert!(matches!(err, GridError::SerializationError(_)));
}

#[test]
fn test_random_layout_depends_only_on_seed() {
    let json = r#"{
        "world": {
            "size": 6,
            "start": { "x": 0, "y": 0 },
            "traps": { "mode": "random", "p_empty": 0.6, "p_trap": 0.4 }
        },
        "max_steps": 30,
        "seed": 21
    }"#;
    let a = Settings::from_json_str(json).unwrap().build_world().unwrap();
    let b = Settings::from_json_str(json).unwrap().build_world().unwrap();
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL.as_bytes()).unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.max_steps, 50);

    let round_trip = Settings::from_json_str(&settings.to_json().unwrap()).unwrap();
    assert_eq!(round_trip, settings);

    assert!(matches!(
        Settings::from_file("/nonexistent/settings.json"),
        Err(GridError::IoError(_))
    ));
}
