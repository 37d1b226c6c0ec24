//! Read-only projection of the match for renderers.
//!
//! `MatchSnapshot` is what the viewer WebSocket pushes and `/match/state`
//! returns. `render_ascii` is the terminal view used in debug logs.

use serde::Serialize;
use uuid::Uuid;

use crate::game::grid::{Cell, Grid};
use crate::game::state::MatchState;
use crate::game::systems::intensity::Intensity;
use crate::game::types::GamePhase;

#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub match_id: Uuid,
    pub phase: GamePhase,
    pub width: usize,
    pub height: usize,
    /// Row-major, `cells[y][x]`.
    pub cells: Vec<Vec<Cell>>,
    /// Newest first.
    pub kill_log: Vec<String>,
    pub player_count_start: usize,
    pub player_count_alive: usize,
    pub alive_ratio: f32,
    pub intensity: Intensity,
}

pub fn build_snapshot(state: &MatchState) -> MatchSnapshot {
    let players = &state.players;
    MatchSnapshot {
        match_id: state.id(),
        phase: state.phase(),
        width: state.grid.width(),
        height: state.grid.height(),
        cells: state.grid.rows().to_vec(),
        kill_log: players.kill_log().entries().map(str::to_string).collect(),
        player_count_start: players.player_count_start(),
        player_count_alive: players.player_count_alive(),
        alive_ratio: players.alive_ratio(),
        intensity: players.intensity(),
    }
}

/// Top row first, so `w` moves up the screen.
pub fn render_ascii(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows().iter().rev() {
        for cell in row {
            let symbol = if cell.wall {
                "###".to_string()
            } else if cell.occupied {
                cell.occupant_name.clone()
            } else if cell.has_gun {
                " G ".to_string()
            } else {
                " . ".to_string()
            };
            out.push_str(&format!("{:<4}", symbol));
        }
        out.push('\n');
    }
    out
}
