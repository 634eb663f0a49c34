use super::aggregate::SimulationStep;
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cursor over a solved trajectory. Stepping past either end is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaybackRecord")]
pub struct SimulationPlayback {
    steps: Vec<SimulationStep>,
    cursor: usize,
}

/// Current position of the playback cursor, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub index: usize,
    pub last_index: usize,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step: {}/{}", self.index, self.last_index)
    }
}

#[derive(Deserialize)]
struct PlaybackRecord {
    steps: Vec<SimulationStep>,
    cursor: usize,
}

impl TryFrom<PlaybackRecord> for SimulationPlayback {
    type Error = DomainError;

    fn try_from(record: PlaybackRecord) -> DomainResult<Self> {
        let mut playback = SimulationPlayback::new(record.steps)?;
        if record.cursor >= playback.steps.len() {
            return Err(DomainError::InvalidCommand {
                reason: format!("Cursor {} is past the last step {}", record.cursor, playback.steps.len() - 1),
            });
        }
        playback.cursor = record.cursor;
        Ok(playback)
    }
}

impl SimulationPlayback {
    pub fn new(steps: Vec<SimulationStep>) -> DomainResult<Self> {
        if steps.is_empty() {
            return Err(DomainError::InvalidCommand {
                reason: "Playback needs at least the starting step".to_string(),
            });
        }
        Ok(Self { steps, cursor: 0 })
    }

    /// Returns whether the cursor moved.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.steps.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Returns whether the cursor moved.
    pub fn backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn current(&self) -> SimulationStep {
        self.steps[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            index: self.cursor,
            last_index: self.steps.len() - 1,
        }
    }
}
