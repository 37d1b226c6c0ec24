//! Player entity.
//!
//! A player owns its position and weapon flag. The grid only keeps a copy of
//! the display data, written every time the player spawns, moves, or dies.

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::game::errors::GameError;
use crate::game::grid::{Cell, Grid};
use crate::game::types::{Color, Direction, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    identity: String,
    name: String,
    color: Color,
    pos: Position,
    has_gun: bool,
}

impl Player {
    /// Spawn on a uniformly random unoccupied cell.
    pub fn spawn<R: Rng + ?Sized>(
        grid: &mut Grid,
        identity: &str,
        name: &str,
        color: Color,
        rng: &mut R,
    ) -> Result<Player, GameError> {
        let pos = grid
            .unoccupied_positions()
            .into_iter()
            .choose(rng)
            .ok_or(GameError::GridFull)?;
        Player::spawn_at(grid, identity, name, color, pos)
    }

    /// Spawn on a given cell, which must be free.
    pub fn spawn_at(
        grid: &mut Grid,
        identity: &str,
        name: &str,
        color: Color,
        pos: Position,
    ) -> Result<Player, GameError> {
        if grid.cell(pos)?.is_occupied() {
            return Err(GameError::GridFull);
        }
        let mut player = Player {
            identity: identity.to_string(),
            name: name.to_string(),
            color,
            pos,
            has_gun: false,
        };
        player.occupy_current_cell(grid)?;
        Ok(player)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn has_gun(&self) -> bool {
        self.has_gun
    }

    pub fn get_gun(&mut self, grid: &mut Grid) -> Result<(), GameError> {
        self.has_gun = true;
        grid.set_player_gun(self.pos, true)
    }

    pub fn lose_gun(&mut self, grid: &mut Grid) -> Result<(), GameError> {
        self.has_gun = false;
        grid.set_player_gun(self.pos, false)
    }

    pub fn current_cell<'g>(&self, grid: &'g Grid) -> Result<&'g Cell, GameError> {
        grid.cell(self.pos)
    }

    pub fn clear_from_cell(&self, grid: &mut Grid) -> Result<(), GameError> {
        grid.clear_cell(self.pos)
    }

    fn occupy_current_cell(&mut self, grid: &mut Grid) -> Result<(), GameError> {
        let picked_up = self.current_cell(grid)?.has_gun();
        if picked_up {
            grid.set_gun(self.pos, false)?;
            debug!("[Player] {} picked up a gun at ({}, {})", self.name, self.pos.x, self.pos.y);
        }
        grid.set_occupant_display(self.pos, &self.name, self.color)?;
        grid.set_occupied(self.pos, true)?;
        if picked_up {
            self.get_gun(grid)
        } else {
            grid.set_player_gun(self.pos, self.has_gun)
        }
    }

    pub fn move_horizontal(&mut self, grid: &mut Grid, delta: i32) -> Result<bool, GameError> {
        self.move_toward(grid, Direction::Right, delta)
    }

    pub fn move_vertical(&mut self, grid: &mut Grid, delta: i32) -> Result<bool, GameError> {
        self.move_toward(grid, Direction::Up, delta)
    }

    /// Walk up to `|distance|` cells along `direction` (reversed when negative),
    /// stopping in front of the first out-of-bounds or occupied cell.
    ///
    /// Returns `false` if the walk was cut short.
    fn move_toward(
        &mut self,
        grid: &mut Grid,
        direction: Direction,
        distance: i32,
    ) -> Result<bool, GameError> {
        let (ux, uy) = direction.delta();
        let sign = distance.signum() as isize;
        // Anything past the longest side leaves the grid anyway.
        let longest = grid.width().max(grid.height());
        let steps = (distance.unsigned_abs() as usize).min(longest);

        self.clear_from_cell(grid)?;

        let mut result = self.pos;
        let mut completed = true;
        for i in 1..=steps as isize {
            let candidate = self
                .pos
                .offset(ux * sign * i, uy * sign * i)
                .filter(|next| grid.is_within_bounds(next.x, next.y));
            match candidate {
                Some(next) if grid.is_free(next) => result = next,
                _ => {
                    completed = false;
                    break;
                }
            }
        }
        self.pos = result;

        self.occupy_current_cell(grid)?;
        Ok(completed)
    }
}
