use super::types::{CellRole, CellWalls, Move, Occupant, Position};
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Walled rectangular grid with per-cell occupants and exit flags.
///
/// Walls are stored once per edge, so the wall between two neighbouring
/// cells is the same flag whichever side it is read from. Horizontal edges
/// are laid out as `height + 1` rows of `width` entries (row `y` is the north
/// side of cell row `y`); vertical edges as `height` rows of `width + 1`
/// entries (column `x` is the west side of cell column `x`). The outer
/// perimeter is stored too so the editor can draw it, but leaving the grid is
/// never legal regardless of those flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct Grid {
    width: u32,
    height: u32,
    horizontal_walls: Vec<bool>,
    vertical_walls: Vec<bool>,
    occupants: Vec<Occupant>,
    exits: Vec<bool>,
}

/// Serialized shape of a `Grid`, checked before it becomes one.
#[derive(Deserialize)]
struct GridRecord {
    width: u32,
    height: u32,
    horizontal_walls: Vec<bool>,
    vertical_walls: Vec<bool>,
    occupants: Vec<Occupant>,
    exits: Vec<bool>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = DomainError;

    fn try_from(record: GridRecord) -> DomainResult<Self> {
        let mut grid = Grid::new(record.width, record.height)?;
        let lengths = [
            (record.horizontal_walls.len(), grid.horizontal_walls.len()),
            (record.vertical_walls.len(), grid.vertical_walls.len()),
            (record.occupants.len(), grid.occupants.len()),
            (record.exits.len(), grid.exits.len()),
        ];
        if lengths.iter().any(|(got, want)| got != want) {
            return Err(DomainError::InvalidCommand {
                reason: format!("Stored layout does not match a {}x{} grid", record.width, record.height),
            });
        }
        grid.horizontal_walls = record.horizontal_walls;
        grid.vertical_walls = record.vertical_walls;
        grid.occupants = record.occupants;
        grid.exits = record.exits;
        Ok(grid)
    }
}

impl Grid {
    pub fn new(width: u32, height: u32) -> DomainResult<Self> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidCommand {
                reason: format!("Grid dimensions must be positive, got {}x{}", width, height),
            });
        }
        let cells = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            horizontal_walls: vec![false; (width as usize) * (height as usize + 1)],
            vertical_walls: vec![false; (width as usize + 1) * (height as usize)],
            occupants: vec![Occupant::None; cells],
            exits: vec![false; cells],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// All cell positions in row-major order (y outer, x inner).
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// The in-bounds cell one step from `pos`, ignoring walls.
    pub fn neighbor(&self, pos: Position, dir: Move) -> Option<Position> {
        if !self.contains(pos) {
            return None;
        }
        let next = match dir {
            Move::Up => Position::new(pos.x, pos.y.checked_sub(1)?),
            Move::Down => Position::new(pos.x, pos.y + 1),
            Move::Left => Position::new(pos.x.checked_sub(1)?, pos.y),
            Move::Right => Position::new(pos.x + 1, pos.y),
        };
        self.contains(next).then_some(next)
    }

    /// Whether the `side` of the cell at `pos` carries a wall. Out-of-bounds cells read as fully walled.
    pub fn has_wall(&self, pos: Position, side: Move) -> bool {
        if !self.contains(pos) {
            return true;
        }
        match side {
            Move::Up | Move::Down => self.horizontal_walls[self.horizontal_edge(pos, side)],
            Move::Left | Move::Right => self.vertical_walls[self.vertical_edge(pos, side)],
        }
    }

    pub fn cell_walls(&self, pos: Position) -> CellWalls {
        CellWalls {
            north: self.has_wall(pos, Move::Up),
            south: self.has_wall(pos, Move::Down),
            east: self.has_wall(pos, Move::Right),
            west: self.has_wall(pos, Move::Left),
        }
    }

    pub fn set_wall(&mut self, pos: Position, side: Move, present: bool) -> DomainResult<()> {
        self.ensure_contains(pos)?;
        match side {
            Move::Up | Move::Down => {
                let idx = self.horizontal_edge(pos, side);
                self.horizontal_walls[idx] = present;
            }
            Move::Left | Move::Right => {
                let idx = self.vertical_edge(pos, side);
                self.vertical_walls[idx] = present;
            }
        }
        Ok(())
    }

    pub fn toggle_wall(&mut self, pos: Position, side: Move) -> DomainResult<()> {
        self.ensure_contains(pos)?;
        let present = self.has_wall(pos, side);
        self.set_wall(pos, side, !present)
    }

    /// Replace all four sides of a cell at once; neighbours see the change through the shared edges.
    pub fn set_cell_walls(&mut self, pos: Position, walls: CellWalls) -> DomainResult<()> {
        self.ensure_contains(pos)?;
        for side in Move::ALL {
            self.set_wall(pos, side, walls.side(side))?;
        }
        Ok(())
    }

    pub fn occupant(&self, pos: Position) -> Occupant {
        if !self.contains(pos) {
            return Occupant::None;
        }
        self.occupants[self.cell_index(pos)]
    }

    pub fn is_exit(&self, pos: Position) -> bool {
        self.contains(pos) && self.exits[self.cell_index(pos)]
    }

    /// Assign an editor role to a cell.
    ///
    /// Placing the evader or the pursuer removes that role from whichever cell
    /// held it before and clears the exit flag underneath. Marking an exit
    /// clears the occupant; `CellRole::None` clears both.
    pub fn assign_role(&mut self, pos: Position, role: CellRole) -> DomainResult<()> {
        self.ensure_contains(pos)?;
        let idx = self.cell_index(pos);
        match role {
            CellRole::Evader | CellRole::Pursuer => {
                let occupant = if role == CellRole::Evader { Occupant::Evader } else { Occupant::Pursuer };
                for cell in self.occupants.iter_mut().filter(|o| **o == occupant) {
                    *cell = Occupant::None;
                }
                self.occupants[idx] = occupant;
                self.exits[idx] = false;
            }
            CellRole::Exit => {
                self.occupants[idx] = Occupant::None;
                self.exits[idx] = true;
            }
            CellRole::None => {
                self.occupants[idx] = Occupant::None;
                self.exits[idx] = false;
            }
        }
        Ok(())
    }

    pub fn evader(&self) -> Option<Position> {
        self.find_occupant(Occupant::Evader)
    }

    pub fn guard(&self) -> Option<Position> {
        self.find_occupant(Occupant::Pursuer)
    }

    /// Exit cells in row-major order.
    pub fn exits(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_exit(*p)).collect()
    }

    fn find_occupant(&self, occupant: Occupant) -> Option<Position> {
        self.positions().find(|p| self.occupant(*p) == occupant)
    }

    fn ensure_contains(&self, pos: Position) -> DomainResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(DomainError::InvalidCommand {
                reason: format!(
                    "Cell {} is outside the {}x{} grid",
                    pos, self.width, self.height
                ),
            })
        }
    }

    fn cell_index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    fn horizontal_edge(&self, pos: Position, side: Move) -> usize {
        let row = if side == Move::Down { pos.y + 1 } else { pos.y };
        row as usize * self.width as usize + pos.x as usize
    }

    fn vertical_edge(&self, pos: Position, side: Move) -> usize {
        let col = if side == Move::Right { pos.x + 1 } else { pos.x };
        pos.y as usize * (self.width as usize + 1) + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_is_visible_from_both_cells() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_wall(Position::new(1, 1), Move::Right, true).unwrap();
        assert!(grid.has_wall(Position::new(2, 1), Move::Left));

        grid.set_wall(Position::new(1, 2), Move::Up, true).unwrap();
        assert!(grid.cell_walls(Position::new(1, 1)).south);

        grid.toggle_wall(Position::new(2, 1), Move::Left).unwrap();
        assert!(!grid.has_wall(Position::new(1, 1), Move::Right));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(DomainError::InvalidCommand { .. })));
    }

    #[test]
    fn placing_evader_twice_moves_it() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.assign_role(Position::new(0, 0), CellRole::Evader).unwrap();
        grid.assign_role(Position::new(1, 1), CellRole::Evader).unwrap();
        assert_eq!(grid.evader(), Some(Position::new(1, 1)));
        assert_eq!(grid.occupant(Position::new(0, 0)), Occupant::None);
    }

    #[test]
    fn stored_layout_must_match_dimensions() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_wall(Position::new(1, 1), Move::Up, true).unwrap();
        let mut value = serde_json::to_value(&grid).unwrap();

        let restored: Grid = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(restored, grid);

        value["vertical_walls"] = serde_json::json!([false]);
        assert!(serde_json::from_value::<Grid>(value.clone()).is_err());

        value["width"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }
}
