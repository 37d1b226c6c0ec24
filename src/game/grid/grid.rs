use serde::{Serialize, Deserialize};

use crate::game::errors::GameError;
use crate::game::types::{Color, Position};

/// One grid position. The occupant fields only mean something while `occupied`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub occupied: bool,
    /// A gun lying on the floor.
    pub has_gun: bool,
    /// The occupant is carrying a gun.
    pub player_gun: bool,
    /// Streamer-placed obstacle. Walled cells are always occupied.
    pub wall: bool,
    pub occupant_name: String,
    pub occupant_color: Color,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn has_gun(&self) -> bool {
        self.has_gun
    }
}

/// Fixed `width x height` matrix of cells, stored row-major as `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::default(); width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_within_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn at(&self, x: usize, y: usize) -> Result<&Cell, GameError> {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(GameError::OutOfBounds { x, y })
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell, GameError> {
        self.at(pos.x, pos.y)
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell, GameError> {
        self.cells
            .get_mut(pos.y)
            .and_then(|row| row.get_mut(pos.x))
            .ok_or(GameError::out_of_bounds(pos))
    }

    /// Out-of-bounds positions count as blocked.
    pub fn is_free(&self, pos: Position) -> bool {
        self.cell(pos).map(|cell| !cell.occupied).unwrap_or(false)
    }

    pub fn set_occupied(&mut self, pos: Position, occupied: bool) -> Result<(), GameError> {
        self.cell_mut(pos)?.occupied = occupied;
        Ok(())
    }

    /// Place or remove a floor gun. Placing one under an occupant is refused
    /// and reported as `Ok(false)`.
    pub fn set_gun(&mut self, pos: Position, has_gun: bool) -> Result<bool, GameError> {
        let cell = self.cell_mut(pos)?;
        if has_gun && cell.occupied {
            return Ok(false);
        }
        cell.has_gun = has_gun;
        Ok(true)
    }

    pub fn set_player_gun(&mut self, pos: Position, player_gun: bool) -> Result<(), GameError> {
        self.cell_mut(pos)?.player_gun = player_gun;
        Ok(())
    }

    pub fn set_occupant_display(
        &mut self,
        pos: Position,
        name: &str,
        color: Color,
    ) -> Result<(), GameError> {
        let cell = self.cell_mut(pos)?;
        cell.occupant_name = name.to_string();
        cell.occupant_color = color;
        Ok(())
    }

    /// Wall off a free cell. Any floor gun underneath is buried with it.
    pub fn set_wall(&mut self, pos: Position) -> Result<bool, GameError> {
        let cell = self.cell_mut(pos)?;
        if cell.occupied {
            return Ok(false);
        }
        cell.wall = true;
        cell.occupied = true;
        cell.has_gun = false;
        Ok(true)
    }

    pub fn clear_cell(&mut self, pos: Position) -> Result<(), GameError> {
        *self.cell_mut(pos)? = Cell::default();
        Ok(())
    }

    /// Every unoccupied position, row by row.
    pub fn unoccupied_positions(&self) -> Vec<Position> {
        self.cells.iter().enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().filter_map(move |(x, cell)| {
                if !cell.occupied {
                    Some(Position { x, y })
                } else {
                    None
                }
            }))
            .collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_generation_size() {
        let grid = Grid::new(8, 5);
        assert_eq!(grid.rows().len(), 5);
        assert!(grid.rows().iter().all(|row| row.len() == 8));
        assert_eq!(grid.unoccupied_positions().len(), 40);
    }

    #[test]
    fn test_at_out_of_bounds() {
        let grid = Grid::new(8, 8);
        assert!(grid.at(7, 7).is_ok());
        assert_eq!(grid.at(8, 0), Err(GameError::OutOfBounds { x: 8, y: 0 }));
        assert!(!grid.is_within_bounds(0, 8));
    }

    #[test]
    fn test_gun_rejected_on_occupied_cell() {
        let mut grid = Grid::new(8, 8);
        let pos = Position::new(2, 3);
        grid.set_occupied(pos, true).unwrap();

        assert_eq!(grid.set_gun(pos, true), Ok(false));
        assert!(!grid.cell(pos).unwrap().has_gun());

        let free = Position::new(4, 4);
        assert_eq!(grid.set_gun(free, true), Ok(true));
        assert!(grid.cell(free).unwrap().has_gun());
    }

    #[test]
    fn test_clear_cell_resets_everything() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(1, 1);
        grid.set_occupied(pos, true).unwrap();
        grid.set_player_gun(pos, true).unwrap();
        grid.set_occupant_display(pos, "ABC", Color::rgb(1, 2, 3)).unwrap();

        grid.clear_cell(pos).unwrap();
        assert_eq!(grid.cell(pos).unwrap(), &Cell::default());
    }

    #[test]
    fn test_wall_blocks_cell() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(0, 0);
        grid.set_gun(pos, true).unwrap();

        assert_eq!(grid.set_wall(pos), Ok(true));
        let cell = grid.cell(pos).unwrap();
        assert!(cell.wall && cell.occupied && !cell.has_gun);
        assert!(!grid.is_free(pos));
        assert_eq!(grid.set_wall(pos), Ok(false));
        assert!(!grid.unoccupied_positions().contains(&pos));
    }
}
