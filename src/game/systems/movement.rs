//! Player movement system.
//!
//! Chat directions become signed moves along one axis: `w`/`s` go through
//! `Player::move_vertical`, `a`/`d` through `Player::move_horizontal`.

use crate::game::entities::Player;
use crate::game::errors::GameError;
use crate::game::grid::Grid;
use crate::game::types::Direction;

/// Move the player up to `distance` cells. Returns `false` on collision.
pub fn move_player(
    grid: &mut Grid,
    player: &mut Player,
    direction: Direction,
    distance: i32,
) -> Result<bool, GameError> {
    match direction {
        Direction::Up => player.move_vertical(grid, distance),
        Direction::Down => player.move_vertical(grid, distance.saturating_neg()),
        Direction::Right => player.move_horizontal(grid, distance),
        Direction::Left => player.move_horizontal(grid, distance.saturating_neg()),
    }
}

/// Replay a string of movement letters one cell at a time.
///
/// Letters other than `w`/`a`/`s`/`d` are skipped. The scan ends at the first
/// blocked step. Returns how many steps were taken.
pub fn run_movement_macro(
    grid: &mut Grid,
    player: &mut Player,
    letters: &str,
) -> Result<usize, GameError> {
    let mut steps = 0;
    for direction in letters.chars().filter_map(Direction::from_char) {
        if !move_player(grid, player, direction, 1)? {
            break;
        }
        steps += 1;
    }
    Ok(steps)
}
