use super::aggregate::{CellRole, Grid, Move, Position};
use crate::common::DomainResult;
use serde::{Deserialize, Serialize};

/// A wall on one side of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSpec {
    pub x: u32,
    pub y: u32,
    pub side: Move,
}

/// JSON description of a grid and where everyone starts.
///
/// ```json
/// { "width": 3, "height": 3,
///   "walls": [{ "x": 1, "y": 0, "side": "down" }],
///   "evader": { "x": 0, "y": 0 }, "guard": { "x": 2, "y": 2 },
///   "exits": [{ "x": 0, "y": 2 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub evader: Option<Position>,
    #[serde(default)]
    pub guard: Option<Position>,
    #[serde(default)]
    pub exits: Vec<Position>,
}

impl Scenario {
    pub fn from_json(source: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build the grid the same way the editor would: walls, then exits, then actors.
    pub fn into_grid(self) -> DomainResult<Grid> {
        let mut grid = Grid::new(self.width, self.height)?;
        for wall in &self.walls {
            grid.set_wall(Position::new(wall.x, wall.y), wall.side, true)?;
        }
        for exit in &self.exits {
            grid.assign_role(*exit, CellRole::Exit)?;
        }
        if let Some(evader) = self.evader {
            grid.assign_role(evader, CellRole::Evader)?;
        }
        if let Some(guard) = self.guard {
            grid.assign_role(guard, CellRole::Pursuer)?;
        }
        Ok(grid)
    }
}
