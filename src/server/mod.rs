// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the host around the game engine:
//! - Application state management
//! - HTTP/WebSocket routing and JSON endpoints
//! - The match server actor and its viewer sessions
//! - Error responses

pub mod state;
pub mod router;
pub mod api;
pub mod match_session;
pub mod error;
