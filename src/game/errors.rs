//! Engine error types.

use crate::game::types::Position;

/// Faults raised by the grid and the player registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A cell accessor was handed coordinates outside the grid.
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },

    /// No unoccupied cell is left to spawn on.
    #[error("no unoccupied cell left on the grid")]
    GridFull,
}

impl GameError {
    pub fn out_of_bounds(pos: Position) -> Self {
        GameError::OutOfBounds { x: pos.x, y: pos.y }
    }
}
