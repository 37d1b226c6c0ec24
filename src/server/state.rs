// src/server/state.rs

//! Application state for the HTTP server.
//!
//! Holds the address of the match server actor, shared between the HTTP and
//! WebSocket handlers.

use actix::Addr;
use crate::server::match_session::MatchServer;

pub struct AppState {
    /// The actor owning the match. Every mutation goes through its mailbox.
    pub match_server: Addr<MatchServer>,
}

impl AppState {
    pub fn new(match_server: Addr<MatchServer>) -> Self {
        AppState { match_server }
    }
}
