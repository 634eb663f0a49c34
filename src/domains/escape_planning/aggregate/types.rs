use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate, 0-indexed from the top-left corner. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single one-cell step. Also names the side of a cell a wall sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order used everywhere a deterministic direction order matters.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who stands on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    None,
    Evader,
    Pursuer,
}

/// Role picked in the cell editor. `Exit` is a flag on the cell rather than an occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    None,
    Evader,
    Pursuer,
    Exit,
}

/// The four wall flags of one cell as seen by the editor and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellWalls {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl CellWalls {
    pub fn closed() -> Self {
        Self { north: true, south: true, east: true, west: true }
    }

    pub fn side(&self, side: Move) -> bool {
        match side {
            Move::Up => self.north,
            Move::Down => self.south,
            Move::Left => self.west,
            Move::Right => self.east,
        }
    }
}

/// The unit of search: where both actors stand. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointState {
    pub evader: Position,
    pub guard: Position,
}

impl JointState {
    pub fn new(evader: Position, guard: Position) -> Self {
        Self { evader, guard }
    }
}

/// Snapshot of both actors after some number of evader moves. Index 0 is the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub evader: Position,
    pub guard: Position,
}

impl From<JointState> for SimulationStep {
    fn from(state: JointState) -> Self {
        Self { evader: state.evader, guard: state.guard }
    }
}

/// Everything a renderer needs to redraw a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub walls: CellWalls,
    pub occupant: Occupant,
    pub exit: bool,
}

/// One editor action against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEdit {
    SetWall { pos: Position, side: Move, present: bool },
    ToggleWall { pos: Position, side: Move },
    SetCellWalls { pos: Position, walls: CellWalls },
    AssignRole { pos: Position, role: CellRole },
}

impl GridEdit {
    pub fn position(&self) -> Position {
        match self {
            GridEdit::SetWall { pos, .. }
            | GridEdit::ToggleWall { pos, .. }
            | GridEdit::SetCellWalls { pos, .. }
            | GridEdit::AssignRole { pos, .. } => *pos,
        }
    }
}
