//! Registry of every living player in the match.
//!
//! Players are keyed by their lowercased chat identity. A second index maps
//! the uppercased display name back to that identity so chat can address a
//! player either way. Both indexes are only ever touched together.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, IteratorRandom};
use serde::Serialize;

use crate::game::entities::player::Player;
use crate::game::errors::GameError;
use crate::game::grid::Grid;
use crate::game::kill_log::{KillLog, colored_name, defeat_line};
use crate::game::systems::intensity::{Intensity, IntensityTracker};
use crate::game::types::{Color, PLAYER_PALETTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinResult {
    Success,
    AlreadyJoined,
    NameTaken,
    GameFull,
}

/// What happened when a player was taken out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Elimination {
    pub killer: String,
    pub victim: String,
    pub entry: String,
    pub alive_ratio: f32,
    pub raised: Vec<Intensity>,
}

pub fn normalize_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct Playerbase {
    players: BTreeMap<String, Player>,
    names: BTreeMap<String, String>,
    player_count_start: usize,
    player_count_alive: usize,
    max_players: usize,
    kill_log: KillLog,
    intensity: IntensityTracker,
}

impl Playerbase {
    pub fn new(max_players: usize) -> Self {
        Self {
            players: BTreeMap::new(),
            names: BTreeMap::new(),
            player_count_start: 0,
            player_count_alive: 0,
            max_players,
            kill_log: KillLog::new(),
            intensity: IntensityTracker::default(),
        }
    }

    pub fn player_is_in_game(&self, identity: &str) -> bool {
        self.players.contains_key(&normalize_identity(identity))
    }

    pub fn name_is_taken(&self, name: &str) -> bool {
        self.names.contains_key(&normalize_name(name))
    }

    /// Spawn `identity` under `name` on a random free cell.
    pub fn try_join<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        identity: &str,
        name: &str,
        rng: &mut R,
    ) -> Result<JoinResult, GameError> {
        self.join_with(grid, identity, name, rng, |grid, identity, name, color, rng| {
            Player::spawn(grid, identity, name, color, rng)
        })
    }

    /// Same as `try_join` but on a chosen cell.
    #[cfg(test)]
    pub fn try_join_at<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        identity: &str,
        name: &str,
        pos: crate::game::types::Position,
        rng: &mut R,
    ) -> Result<JoinResult, GameError> {
        self.join_with(grid, identity, name, rng, |grid, identity, name, color, _| {
            Player::spawn_at(grid, identity, name, color, pos)
        })
    }

    fn join_with<R, F>(
        &mut self,
        grid: &mut Grid,
        identity: &str,
        name: &str,
        rng: &mut R,
        spawn: F,
    ) -> Result<JoinResult, GameError>
    where
        R: Rng + ?Sized,
        F: FnOnce(&mut Grid, &str, &str, Color, &mut R) -> Result<Player, GameError>,
    {
        let identity = normalize_identity(identity);
        let name = normalize_name(name);

        if self.player_is_in_game(&identity) {
            return Ok(JoinResult::AlreadyJoined);
        }
        if self.name_is_taken(&name) {
            return Ok(JoinResult::NameTaken);
        }
        if self.players.len() >= self.max_players {
            warn!(
                "[Playerbase] {identity} refused: {} players already joined",
                self.players.len()
            );
            return Ok(JoinResult::GameFull);
        }

        let color = PLAYER_PALETTE.choose(rng).copied().unwrap_or(Color::rgb(255, 0, 0));
        let player = match spawn(grid, &identity, &name, color, rng) {
            Ok(player) => player,
            Err(GameError::GridFull) => {
                warn!("[Playerbase] {identity} refused: no free cell left");
                return Ok(JoinResult::GameFull);
            }
            Err(e) => return Err(e),
        };

        info!(
            "[Playerbase] {identity} joined as {name} at ({}, {})",
            player.pos().x,
            player.pos().y
        );
        self.names.insert(name, identity.clone());
        self.players.insert(identity, player);
        self.player_count_start += 1;
        self.player_count_alive += 1;
        Ok(JoinResult::Success)
    }

    /// Map a display name (or a raw identity) to the identity that owns it.
    pub fn resolve_identity(&self, name_or_identity: &str) -> Option<&str> {
        if let Some(identity) = self.names.get(&normalize_name(name_or_identity)) {
            return Some(identity.as_str());
        }
        self.players
            .get_key_value(&normalize_identity(name_or_identity))
            .map(|(identity, _)| identity.as_str())
    }

    /// Exact identity lookup, for the issuer of a command.
    pub fn get(&self, identity: &str) -> Option<&Player> {
        self.players.get(&normalize_identity(identity))
    }

    pub fn get_mut(&mut self, identity: &str) -> Option<&mut Player> {
        self.players.get_mut(&normalize_identity(identity))
    }

    pub fn try_get_player(&self, name_or_identity: &str) -> Option<&Player> {
        let identity = self.resolve_identity(name_or_identity)?;
        self.players.get(identity)
    }

    /// Identity first, then display name. Used where the key names the actor.
    fn owner_of(&self, identity_or_name: &str) -> Option<String> {
        let identity = normalize_identity(identity_or_name);
        if self.players.contains_key(&identity) {
            return Some(identity);
        }
        self.resolve_identity(identity_or_name).map(str::to_string)
    }

    /// Remove `target` from the match, credited to `killer`.
    ///
    /// Returns `Ok(None)` when the target is not a living player.
    pub fn eliminate(
        &mut self,
        grid: &mut Grid,
        target: &str,
        killer: &str,
    ) -> Result<Option<Elimination>, GameError> {
        let Some(target_identity) = self.resolve_identity(target).map(str::to_string) else {
            debug!("[Playerbase] Ignoring elimination of unknown player {target}");
            return Ok(None);
        };
        let killer_player = self.get(killer).or_else(|| self.try_get_player(killer));
        let (killer_name, killer_tag) = match killer_player {
            Some(player) => (
                player.name().to_string(),
                colored_name(player.name(), player.color()),
            ),
            None => (normalize_name(killer), normalize_name(killer)),
        };
        let Some(victim) = self.players.remove(&target_identity) else {
            return Ok(None);
        };
        self.names.remove(victim.name());
        victim.clear_from_cell(grid)?;

        let entry = defeat_line(&killer_tag, &colored_name(victim.name(), victim.color()));
        self.kill_log.record(entry.clone());
        self.player_count_alive = self.player_count_alive.saturating_sub(1);

        let alive_ratio = self.alive_ratio();
        let raised = self.intensity.observe(alive_ratio);
        info!(
            "[Playerbase] {} eliminated by {killer_name}, {}/{} alive",
            victim.name(),
            self.player_count_alive,
            self.player_count_start
        );

        Ok(Some(Elimination {
            killer: killer_name,
            victim: victim.name().to_string(),
            entry,
            alive_ratio,
            raised,
        }))
    }

    /// Eliminate a uniformly random living player other than the caller.
    pub fn eliminate_random<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        caller: &str,
        rng: &mut R,
    ) -> Result<Option<Elimination>, GameError> {
        let Some(caller_identity) = self.get(caller).map(|player| player.identity().to_string())
        else {
            return Ok(None);
        };
        let target = self
            .players
            .keys()
            .filter(|identity| **identity != caller_identity)
            .choose(rng)
            .cloned();
        match target {
            Some(target) => self.eliminate(grid, &target, &caller_identity),
            None => Ok(None),
        }
    }

    pub fn has_gun(&self, identity_or_name: &str) -> bool {
        self.owner_of(identity_or_name)
            .and_then(|identity| self.players.get(&identity))
            .map(Player::has_gun)
            .unwrap_or(false)
    }

    pub fn remove_gun(&mut self, grid: &mut Grid, identity_or_name: &str) -> Result<(), GameError> {
        let Some(identity) = self.owner_of(identity_or_name) else {
            return Ok(());
        };
        match self.players.get_mut(&identity) {
            Some(player) => player.lose_gun(grid),
            None => Ok(()),
        }
    }

    /// The last player standing, once only one is left.
    pub fn survivor(&self) -> Option<&Player> {
        if self.players.len() == 1 {
            self.players.values().next()
        } else {
            None
        }
    }

    pub fn player_count_start(&self) -> usize {
        self.player_count_start
    }

    pub fn player_count_alive(&self) -> usize {
        self.player_count_alive
    }

    /// `alive / start`, or 1.0 before anyone has joined.
    pub fn alive_ratio(&self) -> f32 {
        if self.player_count_start == 0 {
            1.0
        } else {
            self.player_count_alive as f32 / self.player_count_start as f32
        }
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity.level()
    }

    pub fn kill_log(&self) -> &KillLog {
        &self.kill_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (Grid, Playerbase, StdRng) {
        (Grid::new(8, 8), Playerbase::new(32), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_join_rules() {
        let (mut grid, mut players, mut rng) = setup();

        assert_eq!(players.try_join(&mut grid, "Alice", "abc", &mut rng), Ok(JoinResult::Success));
        assert_eq!(players.try_join(&mut grid, "bob", "ABC", &mut rng), Ok(JoinResult::NameTaken));
        assert_eq!(
            players.try_join(&mut grid, "alice", "XYZ", &mut rng),
            Ok(JoinResult::AlreadyJoined)
        );
        assert_eq!(players.player_count_start(), 1);
        assert_eq!(players.player_count_alive(), 1);
        assert!(!players.player_is_in_game("bob"));
    }

    #[test]
    fn test_game_full_when_capacity_reached() {
        let mut grid = Grid::new(8, 8);
        let mut players = Playerbase::new(1);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(players.try_join(&mut grid, "a", "AAA", &mut rng), Ok(JoinResult::Success));
        assert_eq!(players.try_join(&mut grid, "b", "BBB", &mut rng), Ok(JoinResult::GameFull));
    }

    #[test]
    fn test_game_full_when_grid_is_saturated() {
        let mut grid = Grid::new(1, 1);
        let mut players = Playerbase::new(32);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(players.try_join(&mut grid, "a", "AAA", &mut rng), Ok(JoinResult::Success));
        assert_eq!(players.try_join(&mut grid, "b", "BBB", &mut rng), Ok(JoinResult::GameFull));
        assert!(!players.name_is_taken("BBB"));
    }

    #[test]
    fn test_resolve_by_name_or_identity() {
        let (mut grid, mut players, mut rng) = setup();
        players.try_join(&mut grid, "Streamer_Fan", "FAN", &mut rng).unwrap();

        assert_eq!(players.resolve_identity("fan"), Some("streamer_fan"));
        assert_eq!(players.resolve_identity("STREAMER_FAN"), Some("streamer_fan"));
        assert_eq!(players.resolve_identity("nobody"), None);
        assert_eq!(players.try_get_player("Fan").map(Player::name), Some("FAN"));
    }

    #[test]
    fn test_eliminate_clears_everything() {
        let (mut grid, mut players, mut rng) = setup();
        players.try_join_at(&mut grid, "a", "AAA", Position::new(0, 0), &mut rng).unwrap();
        players.try_join_at(&mut grid, "b", "BBB", Position::new(5, 5), &mut rng).unwrap();

        let elimination = players.eliminate(&mut grid, "bbb", "a").unwrap().unwrap();
        assert_eq!(elimination.killer, "AAA");
        assert_eq!(elimination.victim, "BBB");
        assert_eq!(elimination.alive_ratio, 0.5);
        assert_eq!(elimination.raised, vec![Intensity::Tense]);

        assert!(players.try_get_player("b").is_none());
        assert!(!players.name_is_taken("BBB"));
        assert!(!grid.at(5, 5).unwrap().is_occupied());
        assert_eq!(players.player_count_alive(), 1);
        assert_eq!(players.player_count_start(), 2);
        assert_eq!(players.survivor().map(Player::name), Some("AAA"));
    }

    #[test]
    fn test_kill_log_format_and_order() {
        let (mut grid, mut players, mut rng) = setup();
        for (identity, name) in [("a", "AAA"), ("b", "BBB"), ("c", "CCC")] {
            players.try_join(&mut grid, identity, name, &mut rng).unwrap();
        }
        let tag = |name: &str| {
            let player = players.try_get_player(name).unwrap();
            colored_name(player.name(), player.color())
        };
        let (aaa, bbb, ccc) = (tag("AAA"), tag("BBB"), tag("CCC"));

        players.eliminate(&mut grid, "BBB", "a").unwrap();
        players.eliminate(&mut grid, "AAA", "c").unwrap();

        let entries: Vec<&str> = players.kill_log().entries().collect();
        assert_eq!(entries, vec![
            format!("{ccc} has defeated {aaa}!"),
            format!("{aaa} has defeated {bbb}!"),
        ]);
    }

    #[test]
    fn test_eliminate_unknown_is_noop() {
        let (mut grid, mut players, mut rng) = setup();
        players.try_join(&mut grid, "a", "AAA", &mut rng).unwrap();

        assert_eq!(players.eliminate(&mut grid, "ZZZ", "a"), Ok(None));
        assert_eq!(players.player_count_alive(), 1);
        assert_eq!(players.kill_log().entries().count(), 0);
    }

    #[test]
    fn test_eliminate_random_never_picks_caller() {
        for seed in 0..20 {
            let mut grid = Grid::new(8, 8);
            let mut players = Playerbase::new(32);
            let mut rng = StdRng::seed_from_u64(seed);
            players.try_join(&mut grid, "a", "AAA", &mut rng).unwrap();
            players.try_join(&mut grid, "b", "BBB", &mut rng).unwrap();

            let elimination = players.eliminate_random(&mut grid, "a", &mut rng).unwrap().unwrap();
            assert_eq!(elimination.victim, "BBB");
            assert!(players.player_is_in_game("a"));
        }
    }

    #[test]
    fn test_eliminate_random_alone_or_unknown() {
        let (mut grid, mut players, mut rng) = setup();
        players.try_join(&mut grid, "a", "AAA", &mut rng).unwrap();

        assert_eq!(players.eliminate_random(&mut grid, "a", &mut rng), Ok(None));
        assert_eq!(players.eliminate_random(&mut grid, "ghost", &mut rng), Ok(None));
        assert_eq!(players.player_count_alive(), 1);
    }

    #[test]
    fn test_gun_passthroughs() {
        let (mut grid, mut players, mut rng) = setup();
        grid.set_gun(Position::new(2, 2), true).unwrap();
        players.try_join_at(&mut grid, "a", "AAA", Position::new(2, 2), &mut rng).unwrap();

        assert!(players.has_gun("AAA"));
        players.remove_gun(&mut grid, "a").unwrap();
        assert!(!players.has_gun("a"));
        assert!(!grid.at(2, 2).unwrap().player_gun);
        assert!(!players.has_gun("ghost"));
        assert_eq!(players.remove_gun(&mut grid, "ghost"), Ok(()));
    }

    #[test]
    fn test_display_name_wins_target_lookup() {
        let (mut grid, mut players, mut rng) = setup();
        players.try_join_at(&mut grid, "zed", "BOB", Position::new(0, 0), &mut rng).unwrap();
        players.try_join_at(&mut grid, "bob", "ALI", Position::new(3, 3), &mut rng).unwrap();

        assert_eq!(players.resolve_identity("bob"), Some("zed"));
        assert_eq!(players.try_get_player("bob").map(Player::name), Some("BOB"));

        let elimination = players.eliminate(&mut grid, "bob", "bob").unwrap().unwrap();
        assert_eq!(elimination.victim, "BOB");
        assert_eq!(elimination.killer, "ALI");
        assert!(players.get("bob").is_some());
        assert!(players.get("zed").is_none());
    }

    #[test]
    fn test_gun_lookup_prefers_identity() {
        let (mut grid, mut players, mut rng) = setup();
        grid.set_gun(Position::new(3, 3), true).unwrap();
        players.try_join_at(&mut grid, "zed", "BOB", Position::new(0, 0), &mut rng).unwrap();
        players.try_join_at(&mut grid, "bob", "ALI", Position::new(3, 3), &mut rng).unwrap();

        assert!(players.has_gun("bob"));
        assert!(!players.has_gun("zed"));
        players.remove_gun(&mut grid, "bob").unwrap();
        assert!(!players.has_gun("ali"));
        assert!(!grid.at(3, 3).unwrap().player_gun);
    }
}
