use prison_escape::Config;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use prison_escape::adapters::outbound::{
    init_combined_logger, init_console_logger, render_session, render_status, FilesystemDataSource,
};
use prison_escape::application::EscapePlanningService;
use prison_escape::domains::escape_planning::{EscapeCommandActor, EscapeEvent, Scenario, ScenarioDataSource};
use prison_escape::DomainEvent;

// 5x3 corridor: the guard starts far enough away for a straight run to the exit
const DEMO_SCENARIO: &str = r#"{
  "width": 5, "height": 3,
  "evader": { "x": 0, "y": 0 },
  "guard": { "x": 4, "y": 0 },
  "exits": [{ "x": 0, "y": 2 }]
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting prison escape planner");

    let config = match Config::from_file("config.toml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default configuration ({})", e);
            Config::default()
        }
    };

    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path, &config.logging.level),
        None => init_console_logger(&config.logging.level),
    };

    // Drain published events so the actor never blocks
    let (event_sender, mut event_receiver) = mpsc::channel::<EscapeEvent>(100);
    tokio::spawn(async move {
        while let Some(event) = event_receiver.recv().await {
            debug!(event_type = event.event_type(), "event published");
        }
    });
    let command_actor = EscapeCommandActor::new(event_sender);

    let data_source = FilesystemDataSource::new(config.scenarios.data_dir.as_ref().map(PathBuf::from));
    let ds_arc: Arc<dyn ScenarioDataSource> = Arc::new(data_source);

    let mut service = EscapePlanningService::new(
        command_actor,
        ds_arc,
        logger,
        config.planner.options(),
        config.planner.pursuit,
    );

    let scenario_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.scenarios.default_scenario.clone());
    if let Err(e) = service.load_scenario(&scenario_name).await {
        warn!("Failed to load {}: {}; falling back to the built-in demo", scenario_name, e);
        let grid = Scenario::from_json(DEMO_SCENARIO)?.into_grid()?;
        service.open_grid(grid).await?;
    }

    if let Err(e) = service.solve().await {
        error!("{}", e);
    }

    loop {
        let Some(session) = service.session() else {
            break;
        };
        println!("{}", render_session(session)?);
        println!("{}\n", render_status(session));
        let before = session.playback_status();
        let after = service.step_forward().await?;
        if after.is_none() || after == before {
            break;
        }
    }

    info!("Done");
    Ok(())
}
