use crate::domains::escape_planning::aggregate::{Grid, Move, Position};

/// Legality and application of one-cell moves on a grid.
#[derive(Debug, Clone, Copy)]
pub struct MovementModel<'a> {
    grid: &'a Grid,
}

impl<'a> MovementModel<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// A move is legal when it stays on the grid and neither the source side
    /// nor the destination's facing side carries a wall.
    pub fn can_move(&self, pos: Position, dir: Move) -> bool {
        let Some(dest) = self.grid.neighbor(pos, dir) else {
            return false;
        };
        !self.grid.has_wall(pos, dir) && !self.grid.has_wall(dest, dir.opposite())
    }

    pub fn move_pos(&self, pos: Position, dir: Move) -> Option<Position> {
        if !self.can_move(pos, dir) {
            return None;
        }
        self.grid.neighbor(pos, dir)
    }
}
