//! Gun rules.
//!
//! A gun is good for one shot. `random` spends it whether or not a target
//! was found; `try_shoot` only fires when the target is a living player.

use rand::Rng;

use crate::game::entities::{Elimination, Playerbase};
use crate::game::errors::GameError;
use crate::game::grid::Grid;

/// The shooter's own identity, when it is a living player holding a gun.
fn armed_shooter(players: &Playerbase, source: &str) -> Option<String> {
    let identity = players.get(source)?.identity().to_string();
    players.has_gun(&identity).then_some(identity)
}

/// Identity `source` shoots `target` (display name or identity).
///
/// Any living player is a valid target, the shooter included.
pub fn try_shoot(
    grid: &mut Grid,
    players: &mut Playerbase,
    source: &str,
    target: &str,
) -> Result<Option<Elimination>, GameError> {
    let Some(shooter) = armed_shooter(players, source) else {
        return Ok(None);
    };
    if players.try_get_player(target).is_none() {
        return Ok(None);
    }
    let elimination = players.eliminate(grid, target, &shooter)?;
    // A shooter who hit themselves has nothing left to disarm.
    if elimination.is_some() && players.get(&shooter).is_some() {
        players.remove_gun(grid, &shooter)?;
    }
    Ok(elimination)
}

/// `source` fires at a random other player. The gun is spent either way.
pub fn try_shoot_random<R: Rng + ?Sized>(
    grid: &mut Grid,
    players: &mut Playerbase,
    source: &str,
    rng: &mut R,
) -> Result<Option<Elimination>, GameError> {
    let Some(shooter) = armed_shooter(players, source) else {
        return Ok(None);
    };
    let elimination = players.eliminate_random(grid, &shooter, rng)?;
    players.remove_gun(grid, &shooter)?;
    Ok(elimination)
}
