use prison_escape::adapters::outbound::{render_session, render_status, FilesystemDataSource};
use prison_escape::common::DomainError;
use prison_escape::domains::escape_planning::*;
use std::fs;
use tempfile::tempdir;

const CORRIDOR: &str = r#"{
  "width": 5,
  "height": 3,
  "evader": { "x": 0, "y": 0 },
  "guard": { "x": 4, "y": 0 },
  "exits": [{ "x": 0, "y": 2 }]
}"#;

#[test]
fn test_load_scenario_from_directory() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));
    fs::write(dir.path().join("corridor.json"), CORRIDOR).unwrap();

    let source = ds.load_scenario("corridor.json").unwrap();
    let grid = Scenario::from_json(&source).unwrap().into_grid().unwrap();

    assert_eq!((grid.width(), grid.height()), (5, 3));
    assert_eq!(grid.evader(), Some(Position::new(0, 0)));
    assert_eq!(grid.guard(), Some(Position::new(4, 0)));
    assert_eq!(grid.exits(), vec![Position::new(0, 2)]);
}

#[test]
fn test_walls_are_applied_from_both_sides() {
    let scenario = Scenario::from_json(
        r#"{
  "width": 3,
  "height": 3,
  "walls": [
    { "x": 1, "y": 1, "side": "up" },
    { "x": 0, "y": 0, "side": "right" }
  ],
  "exits": [{ "x": 2, "y": 2 }]
}"#,
    )
    .unwrap();
    let grid = scenario.into_grid().unwrap();

    assert!(grid.has_wall(Position::new(1, 0), Move::Down));
    assert!(grid.has_wall(Position::new(1, 0), Move::Left));
    assert!(!grid.has_wall(Position::new(1, 1), Move::Down));
    assert_eq!(grid.evader(), None);
    assert_eq!(grid.guard(), None);
}

#[test]
fn test_list_scenarios_is_sorted_and_filtered() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));
    fs::write(dir.path().join("zeta.json"), CORRIDOR).unwrap();
    fs::write(dir.path().join("alpha.json"), CORRIDOR).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a scenario").unwrap();

    assert_eq!(ds.list_scenarios().unwrap(), vec!["alpha.json", "zeta.json"]);
}

#[test]
fn test_missing_scenario_file_returns_error() {
    let dir = tempdir().unwrap();
    let ds = FilesystemDataSource::new(Some(dir.path().to_path_buf()));

    let res = ds.load_scenario("nope.json");
    assert!(matches!(res, Err(DomainError::InfrastructureError(_))));
}

#[test]
fn test_malformed_scenario_is_a_serialization_error() {
    let res = Scenario::from_json("{ \"width\": 3 ");
    assert!(matches!(res, Err(DomainError::SerializationError(_))));
}

#[test]
fn test_out_of_bounds_scenario_entries_are_rejected() {
    let scenario = Scenario::from_json(
        r#"{ "width": 2, "height": 2, "evader": { "x": 5, "y": 0 }, "exits": [] }"#,
    )
    .unwrap();
    assert!(matches!(scenario.into_grid(), Err(DomainError::InvalidCommand { .. })));

    let empty = Scenario::from_json(r#"{ "width": 0, "height": 2, "exits": [] }"#).unwrap();
    assert!(empty.into_grid().is_err());
}

#[test]
fn test_render_session_draws_actors_and_walls() {
    let grid = Scenario::from_json(CORRIDOR).unwrap().into_grid().unwrap();
    let session = EscapeSession::new("s".to_string(), grid, PlannerOptions::default(), PursuitKind::Greedy);

    let rendered = render_session(&session).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with('+'));
    assert!(lines[1].contains(" P "));
    assert!(lines[1].contains(" G "));
    assert!(lines[5].contains(" E "));
    assert_eq!(render_status(&session), "");
}
