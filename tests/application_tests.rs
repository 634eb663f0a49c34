use std::fs;
use std::sync::Arc;

use prison_escape::adapters::outbound::{init_noop_logger, FilesystemDataSource};
use prison_escape::application::EscapePlanningService;
use prison_escape::common::{AggregateRoot, ApplicationError, DomainError};
use prison_escape::domains::escape_planning::*;
use prison_escape::Config;
use tempfile::TempDir;
use tokio::sync::mpsc;

const CORRIDOR: &str = r#"{
  "width": 5, "height": 3,
  "evader": { "x": 0, "y": 0 },
  "guard": { "x": 4, "y": 0 },
  "exits": [{ "x": 0, "y": 2 }]
}"#;

fn service_with_scenarios() -> (EscapePlanningService, mpsc::Receiver<EscapeEvent>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("corridor.json"), CORRIDOR).unwrap();

    let (tx, rx) = mpsc::channel(100);
    let service = EscapePlanningService::new(
        EscapeCommandActor::new(tx),
        Arc::new(FilesystemDataSource::new(Some(dir.path().to_path_buf()))),
        init_noop_logger(),
        PlannerOptions::default(),
        PursuitKind::Greedy,
    );
    (service, rx, dir)
}

fn drain(rx: &mut mpsc::Receiver<EscapeEvent>) -> Vec<EscapeEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_load_solve_and_step_publishes_events() {
    let (mut service, mut rx, _dir) = service_with_scenarios();

    let session = service.load_scenario("corridor.json").await.unwrap();
    assert_eq!(session.grid.width(), 5);

    assert_eq!(service.solve().await.unwrap(), 2);
    let status = service.step_forward().await.unwrap();
    assert_eq!(status, Some(PlaybackStatus { index: 1, last_index: 2 }));

    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], EscapeEvent::SessionCreated { .. }));
    assert!(matches!(events[1], EscapeEvent::PlanFound { .. }));
    assert!(matches!(events[2], EscapeEvent::SteppedForward { index: 1, .. }));

    // everything was published, nothing left pending on the aggregate
    assert!(service.session().unwrap().uncommitted_events().is_empty());
}

#[tokio::test]
async fn test_failed_solve_is_published_and_returned() {
    let (mut service, mut rx, _dir) = service_with_scenarios();
    service.load_scenario("corridor.json").await.unwrap();
    service
        .edit_grid(GridEdit::AssignRole { pos: Position::new(4, 0), role: CellRole::None })
        .await
        .unwrap();

    let result = service.solve().await;
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Configuration { .. }))
    ));

    let events = drain(&mut rx);
    match events.last().unwrap() {
        EscapeEvent::PlanFailed { reason, .. } => {
            assert_eq!(reason, "Please set both a prisoner and a guard.")
        }
        other => panic!("Expected PlanFailed, got {:?}", other),
    }
    assert_eq!(
        service.session().unwrap().status_message.as_deref(),
        Some("Please set both a prisoner and a guard.")
    );
}

#[tokio::test]
async fn test_commands_require_a_grid() {
    let (mut service, _rx, _dir) = service_with_scenarios();

    assert!(service.session().is_none());
    assert!(matches!(
        service.solve().await,
        Err(ApplicationError::Domain(DomainError::InvalidCommand { .. }))
    ));
    assert!(matches!(
        service.edit_grid(GridEdit::ToggleWall { pos: Position::new(0, 0), side: Move::Up }).await,
        Err(ApplicationError::Domain(DomainError::InvalidCommand { .. }))
    ));
    assert!(service.step_forward().await.is_err());
}

#[tokio::test]
async fn test_missing_scenario_keeps_previous_session() {
    let (mut service, _rx, _dir) = service_with_scenarios();
    service.load_scenario("corridor.json").await.unwrap();
    let id = service.session().unwrap().id.clone();

    let result = service.load_scenario("absent.json").await;
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InfrastructureError(_)))
    ));
    assert_eq!(service.session().unwrap().id, id);
}

#[tokio::test]
async fn test_closed_channel_surfaces_publishing_error() {
    let (mut service, rx, _dir) = service_with_scenarios();
    drop(rx);

    let result = service.load_scenario("corridor.json").await;
    assert!(matches!(result, Err(ApplicationError::EventPublishing(_))));
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = Config::from_toml(
        r#"
[planner]
heuristic = "all_exits"
pursuit = "shortest_path"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(config.planner.heuristic, HeuristicMode::AllExits);
    assert_eq!(config.planner.pursuit, PursuitKind::ShortestPath);
    assert_eq!(config.planner.guard_moves_per_turn, 2);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file.is_none());
    assert_eq!(config.scenarios.default_scenario, "corridor.json");

    let empty = Config::from_toml("").unwrap();
    assert_eq!(empty.planner.options(), PlannerOptions::default());
}

#[test]
fn test_config_rejects_stationary_guard() {
    let result = Config::from_toml("[planner]\nguard_moves_per_turn = 0\n");
    assert!(result.is_err());
}
