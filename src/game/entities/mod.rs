//! Game entities module.
//!
//! This module organizes the player entity and the player registry.

pub mod player;
pub mod playerbase;

pub use player::*;
pub use playerbase::*;
