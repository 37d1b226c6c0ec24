//! Match server actor.
//!
//! Owns the single `MatchState` and applies chat lines, start signals and
//! object placements one mailbox message at a time, so every command runs to
//! completion before the next one is looked at. Viewers are told about the
//! new grid after each change.

use actix::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;
use log::{debug, info};

use crate::game::errors::GameError;
use crate::game::interpreter::{ChatCommand, MatchEvent, execute};
use crate::game::state::MatchState;
use crate::game::systems::render::render_ascii;
use super::messages::{
    ChatLine, GetSnapshot, PlaceObject, RegisterViewer, SnapshotUpdate, StartMatch,
    UnregisterViewer,
};
use super::viewer::ViewerSession;

pub struct MatchServer {
    state: MatchState,
    viewers: HashMap<Uuid, Addr<ViewerSession>>,
}

impl MatchServer {
    pub fn new(state: MatchState) -> Self {
        Self {
            state,
            viewers: HashMap::new(),
        }
    }

    fn broadcast_snapshot(&self) {
        debug!(
            "[MatchServer] Broadcast snapshot: match_id={} viewers={}\n{}",
            self.state.id(),
            self.viewers.len(),
            render_ascii(&self.state.grid)
        );
        let update = SnapshotUpdate { snapshot: self.state.snapshot() };
        for addr in self.viewers.values() {
            addr.do_send(update.clone());
        }
    }
}

impl Actor for MatchServer {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("[MatchServer] Hosting match {}", self.state.id());
    }
}

impl Handler<ChatLine> for MatchServer {
    type Result = MessageResult<ChatLine>;

    fn handle(&mut self, msg: ChatLine, _: &mut Context<Self>) -> Self::Result {
        let command = ChatCommand::parse(&msg.identity, &msg.line);
        debug!(
            "[MatchServer] {} -> {:?} {:?}",
            command.identity, command.command, command.args
        );
        let outcome = execute(&mut self.state, &command);

        for event in &outcome.events {
            match event {
                MatchEvent::IntensityRaised { level } => {
                    info!("[MatchServer] Intensity raised to {level:?}");
                }
                MatchEvent::Victory { name } => {
                    info!("[MatchServer] {name} wins match {}", self.state.id());
                }
                MatchEvent::Eliminated { .. } => {}
            }
        }
        if outcome.eliminations().next().is_some() {
            let players = &self.state.players;
            if let Some(entry) = players.kill_log().latest() {
                debug!(
                    "[MatchServer] Kill feed: {entry} (alive ratio {:.2})",
                    players.alive_ratio()
                );
            }
        }
        if outcome.changed {
            self.broadcast_snapshot();
        }
        MessageResult(outcome)
    }
}

impl Handler<StartMatch> for MatchServer {
    type Result = bool;

    fn handle(&mut self, _: StartMatch, _: &mut Context<Self>) -> Self::Result {
        let started = self.state.start_match();
        if started {
            self.broadcast_snapshot();
        }
        started
    }
}

impl Handler<PlaceObject> for MatchServer {
    type Result = Result<bool, GameError>;

    fn handle(&mut self, msg: PlaceObject, _: &mut Context<Self>) -> Self::Result {
        let placed = self.state.place_object(msg.object, msg.pos())?;
        if placed {
            self.broadcast_snapshot();
        }
        Ok(placed)
    }
}

impl Handler<GetSnapshot> for MatchServer {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.state.snapshot())
    }
}

impl Handler<RegisterViewer> for MatchServer {
    type Result = ();

    fn handle(&mut self, msg: RegisterViewer, _: &mut Context<Self>) -> Self::Result {
        msg.addr.do_send(SnapshotUpdate { snapshot: self.state.snapshot() });
        self.viewers.insert(msg.viewer_id, msg.addr);
        debug!("[MatchServer] Viewer {} connected ({} total)", msg.viewer_id, self.viewers.len());
    }
}

impl Handler<UnregisterViewer> for MatchServer {
    type Result = ();

    fn handle(&mut self, msg: UnregisterViewer, _: &mut Context<Self>) -> Self::Result {
        self.viewers.remove(&msg.viewer_id);
        debug!("[MatchServer] Viewer {} disconnected", msg.viewer_id);
    }
}
