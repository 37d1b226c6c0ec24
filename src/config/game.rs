/// Game configuration constants.
///
/// This module defines the grid dimensions, the join capacity, and the
/// alive-ratio thresholds used to raise the match intensity.
use log::warn;

/// Number of columns in the game grid.
pub const GRID_WIDTH: usize = 8;

/// Number of rows in the game grid.
pub const GRID_HEIGHT: usize = 8;

/// Maximum number of players allowed to join a single match.
pub const MAX_PLAYERS: usize = 32;

/// Length of every in-game display name.
pub const NAME_LENGTH: usize = 3;

/// Alive ratio below which the match becomes tense.
pub const TENSE_RATIO: f32 = 2.0 / 3.0;

/// Alive ratio below which the match becomes frantic.
pub const FRANTIC_RATIO: f32 = 1.0 / 3.0;

/// Runtime view of the game constants, overridable from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            max_players: MAX_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Read `FRUIT_GUNCH_WIDTH`, `FRUIT_GUNCH_HEIGHT` and `FRUIT_GUNCH_MAX_PLAYERS`.
    /// Missing or invalid values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_usize("FRUIT_GUNCH_WIDTH", defaults.width),
            height: env_usize("FRUIT_GUNCH_HEIGHT", defaults.height),
            max_players: env_usize("FRUIT_GUNCH_MAX_PLAYERS", defaults.max_players),
        }
    }
}

pub(crate) fn env_usize(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(value) if value > 0 => value,
            _ => {
                warn!("[Config] Ignoring invalid {key}={raw:?}, using {default}");
                default
            }
        },
        Err(_) => default,
    }
}
