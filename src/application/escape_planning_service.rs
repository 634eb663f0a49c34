use std::sync::Arc;
use uuid::Uuid;

use crate::common::{AggregateRoot, ApplicationError, ApplicationResult, DomainError, DomainResult};
use crate::domains::escape_planning::{
    EscapeCommandActor, EscapeSession, Grid, GridEdit, PlannerOptions, PlaybackStatus, PursuitKind,
    Scenario, ScenarioDataSource,
};
use crate::domains::logger::DynLogger;

/// Drives one `EscapeSession`: loads scenarios, forwards editor and playback
/// commands, and publishes every resulting event through the command actor.
pub struct EscapePlanningService {
    command_actor: EscapeCommandActor,
    data_source: Arc<dyn ScenarioDataSource>,
    logger: DynLogger,
    options: PlannerOptions,
    pursuit: PursuitKind,
    session: Option<EscapeSession>,
}

impl EscapePlanningService {
    pub fn new(
        command_actor: EscapeCommandActor,
        data_source: Arc<dyn ScenarioDataSource>,
        logger: DynLogger,
        options: PlannerOptions,
        pursuit: PursuitKind,
    ) -> Self {
        Self {
            command_actor,
            data_source,
            logger,
            options,
            pursuit,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&EscapeSession> {
        self.session.as_ref()
    }

    /// Start a fresh session on `grid`, discarding any previous one.
    pub async fn open_grid(&mut self, grid: Grid) -> ApplicationResult<&EscapeSession> {
        let id = Uuid::new_v4().to_string();
        self.logger.info(&format!(
            "Opening session {} on a {}x{} grid",
            id,
            grid.width(),
            grid.height()
        ));
        let session = EscapeSession::new(id, grid, self.options, self.pursuit);
        let session = self.session.insert(session);
        Self::commit(&self.command_actor, session).await?;
        Ok(&*session)
    }

    pub async fn load_scenario(&mut self, name: &str) -> ApplicationResult<&EscapeSession> {
        let source = self.data_source.load_scenario(name)?;
        let grid = Scenario::from_json(&source)?.into_grid()?;
        self.logger.info(&format!("Loaded scenario {}", name));
        self.open_grid(grid).await
    }

    pub async fn edit_grid(&mut self, edit: GridEdit) -> ApplicationResult<()> {
        let session = self.session_mut()?;
        let result = session.edit_grid(edit);
        self.finish(result).await
    }

    /// Run the planner. Failures are logged, published and returned.
    pub async fn solve(&mut self) -> ApplicationResult<usize> {
        let session = self.session_mut()?;
        let result = session.solve();
        match &result {
            Ok(moves) => self.logger.info(&format!("Escape found in {} moves", moves)),
            Err(err) => self.logger.warn(&format!("Solve failed: {}", err)),
        }
        self.finish(result).await
    }

    pub async fn step_forward(&mut self) -> ApplicationResult<Option<PlaybackStatus>> {
        let session = self.session_mut()?;
        let result = session.step_forward();
        self.finish(result).await
    }

    pub async fn step_backward(&mut self) -> ApplicationResult<Option<PlaybackStatus>> {
        let session = self.session_mut()?;
        let result = session.step_backward();
        self.finish(result).await
    }

    fn session_mut(&mut self) -> ApplicationResult<&mut EscapeSession> {
        self.session.as_mut().ok_or_else(|| {
            ApplicationError::Domain(DomainError::InvalidCommand {
                reason: "No grid loaded; open a grid or scenario first".to_string(),
            })
        })
    }

    /// Publish whatever the command recorded, then surface its result.
    async fn finish<T>(&mut self, result: DomainResult<T>) -> ApplicationResult<T> {
        if let Some(session) = self.session.as_mut() {
            Self::commit(&self.command_actor, session).await?;
        }
        Ok(result?)
    }

    async fn commit(actor: &EscapeCommandActor, session: &mut EscapeSession) -> ApplicationResult<()> {
        actor
            .publish_all(session.uncommitted_events())
            .await
            .map_err(ApplicationError::EventPublishing)?;
        session.mark_events_as_committed();
        Ok(())
    }
}
