use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::aggregate::{GridEdit, Move, SimulationStep};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EscapeEvent {
    SessionCreated {
        session_id: String,
        width: u32,
        height: u32,
        timestamp: DateTime<Utc>,
    },
    GridEdited {
        session_id: String,
        edit: GridEdit,
        timestamp: DateTime<Utc>,
    },
    PlanFound {
        session_id: String,
        moves: Vec<Move>,
        steps: Vec<SimulationStep>,
        expanded_states: usize,
        timestamp: DateTime<Utc>,
    },
    PlanFailed {
        session_id: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    SteppedForward {
        session_id: String,
        index: usize,
        timestamp: DateTime<Utc>,
    },
    SteppedBackward {
        session_id: String,
        index: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for EscapeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            EscapeEvent::SessionCreated { .. } => "SessionCreated",
            EscapeEvent::GridEdited { .. } => "GridEdited",
            EscapeEvent::PlanFound { .. } => "PlanFound",
            EscapeEvent::PlanFailed { .. } => "PlanFailed",
            EscapeEvent::SteppedForward { .. } => "SteppedForward",
            EscapeEvent::SteppedBackward { .. } => "SteppedBackward",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            EscapeEvent::SessionCreated { session_id, .. } => session_id,
            EscapeEvent::GridEdited { session_id, .. } => session_id,
            EscapeEvent::PlanFound { session_id, .. } => session_id,
            EscapeEvent::PlanFailed { session_id, .. } => session_id,
            EscapeEvent::SteppedForward { session_id, .. } => session_id,
            EscapeEvent::SteppedBackward { session_id, .. } => session_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            EscapeEvent::SessionCreated { timestamp, .. } => *timestamp,
            EscapeEvent::GridEdited { timestamp, .. } => *timestamp,
            EscapeEvent::PlanFound { timestamp, .. } => *timestamp,
            EscapeEvent::PlanFailed { timestamp, .. } => *timestamp,
            EscapeEvent::SteppedForward { timestamp, .. } => *timestamp,
            EscapeEvent::SteppedBackward { timestamp, .. } => *timestamp,
        }
    }
}
