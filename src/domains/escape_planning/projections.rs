use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::events::EscapeEvent;

/// Projection summarizing what happened in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscapeSessionOverview {
    pub session_id: String,
    pub width: u32,
    pub height: u32,
    pub grid_edits: usize,
    pub solve_attempts: usize,
    pub solutions_found: usize,
    pub failures: usize,
    pub last_move_count: Option<usize>,
    pub last_status: Option<String>,
    pub playback_index: Option<usize>,
    pub last_activity: DateTime<Utc>,
}

impl EscapeSessionOverview {
    pub fn new(session_id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            width: 0,
            height: 0,
            grid_edits: 0,
            solve_attempts: 0,
            solutions_found: 0,
            failures: 0,
            last_move_count: None,
            last_status: None,
            playback_index: None,
            last_activity: created_at,
        }
    }

    pub fn apply_event(&mut self, event: &EscapeEvent) {
        match event {
            EscapeEvent::SessionCreated { width, height, timestamp, .. } => {
                self.width = *width;
                self.height = *height;
                self.last_activity = *timestamp;
            }
            EscapeEvent::GridEdited { timestamp, .. } => {
                self.grid_edits += 1;
                self.playback_index = None;
                self.last_activity = *timestamp;
            }
            EscapeEvent::PlanFound { moves, timestamp, .. } => {
                self.solve_attempts += 1;
                self.solutions_found += 1;
                self.last_move_count = Some(moves.len());
                self.last_status = Some(format!("Escape found in {} moves.", moves.len()));
                self.playback_index = Some(0);
                self.last_activity = *timestamp;
            }
            EscapeEvent::PlanFailed { reason, timestamp, .. } => {
                self.solve_attempts += 1;
                self.failures += 1;
                self.last_move_count = None;
                self.last_status = Some(reason.clone());
                self.playback_index = None;
                self.last_activity = *timestamp;
            }
            EscapeEvent::SteppedForward { index, timestamp, .. }
            | EscapeEvent::SteppedBackward { index, timestamp, .. } => {
                self.playback_index = Some(*index);
                self.last_activity = *timestamp;
            }
        }
    }
}
