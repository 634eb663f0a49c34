use crate::domains::escape_planning::aggregate::{Grid, Position};

pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Exit detection and nearest-exit lookup. The exit set is captured once at
/// construction, in row-major order.
#[derive(Debug, Clone)]
pub struct GoalOracle<'a> {
    grid: &'a Grid,
    exits: Vec<Position>,
}

impl<'a> GoalOracle<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, exits: grid.exits() }
    }

    pub fn is_exit(&self, pos: Position) -> bool {
        self.grid.is_exit(pos)
    }

    /// Closest exit by Manhattan distance; ties go to the first exit in row-major order.
    pub fn find_nearest_exit(&self, from: Position) -> Option<Position> {
        let mut best: Option<(u32, Position)> = None;
        for exit in &self.exits {
            let dist = manhattan_distance(from, *exit);
            if best.map_or(true, |(min, _)| dist < min) {
                best = Some((dist, *exit));
            }
        }
        best.map(|(_, exit)| exit)
    }

    /// Distance to whichever exit is closest to `from`.
    pub fn distance_to_nearest_exit(&self, from: Position) -> Option<u32> {
        self.exits.iter().map(|exit| manhattan_distance(from, *exit)).min()
    }
}
