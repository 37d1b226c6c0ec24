//! Chat command interpreter.
//!
//! Turns one tokenized chat line into mutations of a `MatchState`, based on
//! the current phase. Nothing here talks to the chat; replies come back as
//! `Whisper`s inside the `CommandOutcome` for the transport to deliver.
//!
//! Rejections the issuer should hear about (bad join names, duplicate joins)
//! produce a whisper. Everything else that does not apply, such as unknown
//! targets, blocked moves or junk arguments, is dropped without a reply.

use log::{debug, error};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::config::game::NAME_LENGTH;
use crate::game::entities::{Elimination, JoinResult};
use crate::game::errors::GameError;
use crate::game::state::MatchState;
use crate::game::systems::combat::{try_shoot, try_shoot_random};
use crate::game::systems::intensity::Intensity;
use crate::game::systems::movement::{move_player, run_movement_macro};
use crate::game::types::{Direction, GamePhase};

pub const HELP_TEXT: &str = "Fruit Gunch commands: !join [name] enters the lobby with a 3-letter name. \
Move with !w !a !s !d [steps] or chain letters like !wwad. \
Pick up a gun by walking over it, then !shoot <name> (or just !<name>) to fire, or !random to fire at anyone.";
pub const JOIN_BAD_NAME: &str = "Names must be at least 3 characters long and use letters only.";
pub const JOIN_ALREADY_JOINED: &str = "You are already in the game.";
pub const JOIN_GAME_FULL: &str = "Sorry, the game is full.";
pub const JOIN_DURING_GAMEPLAY: &str = "You can't join while a match is in progress. Wait for the next lobby!";

pub fn join_success_message(name: &str) -> String {
    format!("You joined the game as {name}!")
}

pub fn join_name_taken_message(name: &str) -> String {
    format!("The name {name} is already taken. Try !join with another name.")
}

/// One chat line, lowercased and split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCommand {
    pub identity: String,
    pub command: String,
    pub args: Vec<String>,
}

impl ChatCommand {
    pub fn new(identity: &str, command: &str, args: &[&str]) -> Self {
        Self {
            identity: identity.to_string(),
            command: command.to_lowercase(),
            args: args.iter().map(|arg| arg.to_lowercase()).collect(),
        }
    }

    /// `"!W 3"` becomes command `w` with args `["3"]`. One leading `!` is stripped.
    pub fn parse(identity: &str, line: &str) -> Self {
        let line = line.trim_start();
        let line = line.strip_prefix('!').unwrap_or(line);
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();
        Self::new(identity, command, &args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Whisper {
    pub to: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    Eliminated {
        killer: String,
        victim: String,
        entry: String,
        alive_ratio: f32,
    },
    IntensityRaised {
        level: Intensity,
    },
    Victory {
        name: String,
    },
}

/// Everything a command produced, for the transport and the renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub whispers: Vec<Whisper>,
    pub events: Vec<MatchEvent>,
    /// Whether the grid may have changed.
    pub changed: bool,
}

impl CommandOutcome {
    fn whisper(&mut self, to: &str, text: impl Into<String>) {
        self.whispers.push(Whisper {
            to: to.to_string(),
            text: text.into(),
        });
    }

    pub fn eliminations(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, MatchEvent::Eliminated { .. }))
    }
}

/// Run one command to completion against the match.
pub fn execute(state: &mut MatchState, command: &ChatCommand) -> CommandOutcome {
    let mut outcome = CommandOutcome::default();
    if let Err(e) = dispatch(state, command, &mut outcome) {
        error!(
            "[Match {}] Command {:?} from {} aborted: {e}",
            state.id(),
            command.command,
            command.identity
        );
    }
    outcome
}

fn dispatch(
    state: &mut MatchState,
    command: &ChatCommand,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    if command.command == "help" {
        outcome.whisper(&command.identity, HELP_TEXT);
        return Ok(());
    }
    match state.phase() {
        GamePhase::Lobby => handle_lobby(state, command, outcome),
        GamePhase::Gameplay => handle_gameplay(state, command, outcome),
    }
}

fn handle_lobby(
    state: &mut MatchState,
    command: &ChatCommand,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    match command.command.as_str() {
        "join" => handle_join(state, command, outcome),
        letters => handle_movement_macro(state, &command.identity, letters, outcome),
    }
}

fn handle_gameplay(
    state: &mut MatchState,
    command: &ChatCommand,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    let source = command.identity.as_str();
    match command.command.as_str() {
        "join" => {
            outcome.whisper(source, JOIN_DURING_GAMEPLAY);
            Ok(())
        }
        "w" => handle_directional(state, command, Direction::Up, outcome),
        "a" => handle_directional(state, command, Direction::Left, outcome),
        "s" => handle_directional(state, command, Direction::Down, outcome),
        "d" => handle_directional(state, command, Direction::Right, outcome),
        "random" => {
            let elimination =
                try_shoot_random(&mut state.grid, &mut state.players, source, &mut state.rng)?;
            record_elimination(state, elimination, outcome);
            Ok(())
        }
        "shoot" => match command.args.first() {
            Some(target) => handle_shot(state, source, target, outcome),
            None => Ok(()),
        },
        token => {
            handle_shot(state, source, token, outcome)?;
            handle_movement_macro(state, source, token, outcome)
        }
    }
}

fn handle_join(
    state: &mut MatchState,
    command: &ChatCommand,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    let source = command.identity.as_str();
    let requested = command.args.first().map(String::as_str);
    let Some(name) = derive_display_name(requested, source, &mut state.rng) else {
        debug!("[Match {}] {source} asked for invalid name {requested:?}", state.id());
        outcome.whisper(source, JOIN_BAD_NAME);
        return Ok(());
    };

    match state.players.try_join(&mut state.grid, source, &name, &mut state.rng)? {
        JoinResult::Success => {
            outcome.changed = true;
            outcome.whisper(source, join_success_message(&name));
        }
        JoinResult::AlreadyJoined => outcome.whisper(source, JOIN_ALREADY_JOINED),
        JoinResult::NameTaken => outcome.whisper(source, join_name_taken_message(&name)),
        JoinResult::GameFull => outcome.whisper(source, JOIN_GAME_FULL),
    }
    Ok(())
}

fn handle_directional(
    state: &mut MatchState,
    command: &ChatCommand,
    direction: Direction,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    let distance = match command.args.first() {
        None => 1,
        Some(arg) => match arg.parse::<i32>() {
            Ok(distance) => distance,
            Err(_) => {
                debug!("[Match {}] Ignoring move with argument {arg:?}", state.id());
                return Ok(());
            }
        },
    };
    let Some(player) = state.players.get_mut(&command.identity) else {
        return Ok(());
    };
    move_player(&mut state.grid, player, direction, distance)?;
    outcome.changed = true;
    Ok(())
}

fn handle_movement_macro(
    state: &mut MatchState,
    source: &str,
    letters: &str,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    let Some(player) = state.players.get_mut(source) else {
        return Ok(());
    };
    if run_movement_macro(&mut state.grid, player, letters)? > 0 {
        outcome.changed = true;
    }
    Ok(())
}

fn handle_shot(
    state: &mut MatchState,
    source: &str,
    target: &str,
    outcome: &mut CommandOutcome,
) -> Result<(), GameError> {
    let elimination = try_shoot(&mut state.grid, &mut state.players, source, target)?;
    record_elimination(state, elimination, outcome);
    Ok(())
}

fn record_elimination(
    state: &MatchState,
    elimination: Option<Elimination>,
    outcome: &mut CommandOutcome,
) {
    let Some(elimination) = elimination else {
        return;
    };
    outcome.changed = true;
    outcome.events.push(MatchEvent::Eliminated {
        killer: elimination.killer,
        victim: elimination.victim,
        entry: elimination.entry,
        alive_ratio: elimination.alive_ratio,
    });
    outcome.events.extend(
        elimination
            .raised
            .into_iter()
            .map(|level| MatchEvent::IntensityRaised { level }),
    );
    if state.phase() == GamePhase::Gameplay {
        if let Some(survivor) = state.players.survivor() {
            outcome.events.push(MatchEvent::Victory {
                name: survivor.name().to_string(),
            });
        }
    }
}

fn is_letters(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Pick the 3-letter display name for a join request.
///
/// A requested name must be long enough and letters only, otherwise `None`.
/// Without one, the identity's first letters are used when they qualify,
/// falling back to random letters.
pub fn derive_display_name<R: Rng + ?Sized>(
    requested: Option<&str>,
    identity: &str,
    rng: &mut R,
) -> Option<String> {
    if let Some(requested) = requested {
        if requested.chars().count() < NAME_LENGTH || !is_letters(requested) {
            return None;
        }
        return Some(requested.chars().take(NAME_LENGTH).collect::<String>().to_uppercase());
    }

    let prefix: String = identity.chars().take(NAME_LENGTH).collect();
    if prefix.chars().count() == NAME_LENGTH && is_letters(&prefix) {
        return Some(prefix.to_uppercase());
    }
    Some((0..NAME_LENGTH).map(|_| rng.random_range('A'..='Z')).collect())
}
