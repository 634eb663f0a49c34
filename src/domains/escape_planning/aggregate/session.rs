use super::grid::Grid;
use super::types::{CellView, GridEdit, Occupant, Position};
use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::escape_planning::events::EscapeEvent;
use crate::domains::escape_planning::planning::{JointStateSearch, PlannerOptions, PursuitKind};
use crate::domains::escape_planning::playback::{PlaybackStatus, SimulationPlayback};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const NO_SOLUTION: &str = "No solution found.";

/// An editing-and-solving session over one grid.
///
/// Owns the grid, the playback of the latest successful solve and the status
/// line shown to the user. A new solve or any grid edit replaces the playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscapeSession {
    pub id: String,
    pub grid: Grid,
    pub options: PlannerOptions,
    pub pursuit: PursuitKind,
    pub playback: Option<SimulationPlayback>,
    pub status_message: Option<String>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<EscapeEvent>,
}

impl EscapeSession {
    pub fn new(id: String, grid: Grid, options: PlannerOptions, pursuit: PursuitKind) -> Self {
        let event = EscapeEvent::SessionCreated {
            session_id: id.clone(),
            width: grid.width(),
            height: grid.height(),
            timestamp: Utc::now(),
        };
        let mut session = Self {
            id,
            grid,
            options,
            pursuit,
            playback: None,
            status_message: None,
            version: 0,
            uncommitted_events: Vec::new(),
        };
        session.add_event(event);
        session
    }

    pub fn edit_grid(&mut self, edit: GridEdit) -> DomainResult<()> {
        let pos = edit.position();
        if !self.grid.contains(pos) {
            return Err(DomainError::InvalidCommand {
                reason: format!("Cell {} is outside the grid", pos),
            });
        }
        self.record(EscapeEvent::GridEdited {
            session_id: self.id.clone(),
            edit,
            timestamp: Utc::now(),
        })
    }

    /// Plan an escape for the current grid and return the number of moves.
    ///
    /// Failures still update the status message and clear any previous playback.
    pub fn solve(&mut self) -> DomainResult<usize> {
        let policy = self.pursuit.policy();
        let outcome = JointStateSearch::new(&self.grid, policy.as_ref(), self.options).solve();
        match outcome {
            Ok(plan) => {
                let move_count = plan.moves.len();
                self.record(EscapeEvent::PlanFound {
                    session_id: self.id.clone(),
                    moves: plan.moves,
                    steps: plan.steps,
                    expanded_states: plan.expanded_states,
                    timestamp: Utc::now(),
                })?;
                Ok(move_count)
            }
            Err(err) => {
                self.record(EscapeEvent::PlanFailed {
                    session_id: self.id.clone(),
                    reason: status_message_for(&err),
                    timestamp: Utc::now(),
                })?;
                Err(err)
            }
        }
    }

    pub fn step_forward(&mut self) -> DomainResult<Option<PlaybackStatus>> {
        if let Some(status) = self.playback_status() {
            if status.index < status.last_index {
                self.record(EscapeEvent::SteppedForward {
                    session_id: self.id.clone(),
                    index: status.index + 1,
                    timestamp: Utc::now(),
                })?;
            }
        }
        Ok(self.playback_status())
    }

    pub fn step_backward(&mut self) -> DomainResult<Option<PlaybackStatus>> {
        if let Some(status) = self.playback_status() {
            if status.index > 0 {
                self.record(EscapeEvent::SteppedBackward {
                    session_id: self.id.clone(),
                    index: status.index - 1,
                    timestamp: Utc::now(),
                })?;
            }
        }
        Ok(self.playback_status())
    }

    pub fn playback_status(&self) -> Option<PlaybackStatus> {
        self.playback.as_ref().map(SimulationPlayback::status)
    }

    /// Render view of one cell. Occupants follow the playback cursor when a
    /// plan is loaded; exit flags always come from the grid.
    pub fn cell_view(&self, pos: Position) -> DomainResult<CellView> {
        if !self.grid.contains(pos) {
            return Err(DomainError::InvalidCommand {
                reason: format!("Cell {} is outside the grid", pos),
            });
        }
        let occupant = match &self.playback {
            Some(playback) => {
                let step = playback.current();
                if step.evader == pos {
                    Occupant::Evader
                } else if step.guard == pos {
                    Occupant::Pursuer
                } else {
                    Occupant::None
                }
            }
            None => self.grid.occupant(pos),
        };
        Ok(CellView {
            walls: self.grid.cell_walls(pos),
            occupant,
            exit: self.grid.is_exit(pos),
        })
    }
}

/// The single user-facing line reported for a failed solve.
pub fn status_message_for(err: &DomainError) -> String {
    match err {
        DomainError::Configuration { reason } => reason.clone(),
        DomainError::SearchExhausted { .. } => NO_SOLUTION.to_string(),
        other => other.to_string(),
    }
}

impl AggregateRoot for EscapeSession {
    type Event = EscapeEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            EscapeEvent::SessionCreated { .. } => {}
            EscapeEvent::GridEdited { edit, .. } => {
                match *edit {
                    GridEdit::SetWall { pos, side, present } => self.grid.set_wall(pos, side, present)?,
                    GridEdit::ToggleWall { pos, side } => self.grid.toggle_wall(pos, side)?,
                    GridEdit::SetCellWalls { pos, walls } => self.grid.set_cell_walls(pos, walls)?,
                    GridEdit::AssignRole { pos, role } => self.grid.assign_role(pos, role)?,
                }
                self.playback = None;
            }
            EscapeEvent::PlanFound { moves, steps, .. } => {
                self.playback = Some(SimulationPlayback::new(steps.clone())?);
                self.status_message = Some(format!("Escape found in {} moves.", moves.len()));
            }
            EscapeEvent::PlanFailed { reason, .. } => {
                self.playback = None;
                self.status_message = Some(reason.clone());
            }
            EscapeEvent::SteppedForward { .. } => {
                if let Some(playback) = self.playback.as_mut() {
                    playback.forward();
                }
            }
            EscapeEvent::SteppedBackward { .. } => {
                if let Some(playback) = self.playback.as_mut() {
                    playback.backward();
                }
            }
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
