pub mod types;
pub mod errors;
pub mod state;
pub mod kill_log;
pub mod interpreter;

pub mod entities;
pub mod grid;
pub mod systems;
