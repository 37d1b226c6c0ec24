use actix::prelude::*;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use super::viewer::ViewerSession;
use crate::game::errors::GameError;
use crate::game::interpreter::CommandOutcome;
use crate::game::systems::render::MatchSnapshot;
use crate::game::types::{PlacedObject, Position};

/// A raw chat line from `identity`, as received by the chat bridge.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "CommandOutcome")]
pub struct ChatLine {
    pub identity: String,
    pub line: String,
}

/// Streamer signal: leave the lobby.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "bool")]
pub struct StartMatch;

/// Streamer object picker.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<bool, GameError>")]
pub struct PlaceObject {
    pub object: PlacedObject,
    pub x: usize,
    pub y: usize,
}

impl PlaceObject {
    pub fn pos(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "MatchSnapshot")]
pub struct GetSnapshot;

#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterViewer {
    pub viewer_id: Uuid,
    pub addr: Addr<ViewerSession>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct UnregisterViewer {
    pub viewer_id: Uuid,
}

/// Pushed to every viewer after a mutating command.
#[derive(Message, Clone, Serialize, Debug)]
#[rtype(result = "()")]
pub struct SnapshotUpdate {
    pub snapshot: MatchSnapshot,
}
