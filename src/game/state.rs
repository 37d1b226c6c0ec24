//! Owned state of one match.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::game::entities::Playerbase;
use crate::game::errors::GameError;
use crate::game::grid::Grid;
use crate::game::systems::render::{MatchSnapshot, build_snapshot};
use crate::game::types::{GamePhase, PlacedObject, Position};

#[derive(Debug, Clone)]
pub struct MatchState {
    id: Uuid,
    phase: GamePhase,
    pub grid: Grid,
    pub players: Playerbase,
    pub(crate) rng: StdRng,
}

impl MatchState {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let id = Uuid::new_v4();
        info!("[Match {id}] Created {}x{} lobby", config.width, config.height);
        Self {
            id,
            phase: GamePhase::Lobby,
            grid: Grid::new(config.width, config.height),
            players: Playerbase::new(config.max_players),
            rng,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Lobby -> Gameplay. Returns `false` if the match was already running.
    pub fn start_match(&mut self) -> bool {
        if self.phase == GamePhase::Gameplay {
            return false;
        }
        self.phase = GamePhase::Gameplay;
        info!(
            "[Match {}] Started with {} players",
            self.id,
            self.players.player_count_alive()
        );
        true
    }

    /// Streamer drops a gun or a wall on a cell. Occupied cells refuse both.
    pub fn place_object(&mut self, object: PlacedObject, pos: Position) -> Result<bool, GameError> {
        let placed = match object {
            PlacedObject::Gun => self.grid.set_gun(pos, true)?,
            PlacedObject::Wall => self.grid.set_wall(pos)?,
        };
        if placed {
            info!("[Match {}] Placed {object:?} at ({}, {})", self.id, pos.x, pos.y);
        }
        Ok(placed)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        build_snapshot(self)
    }
}
