pub mod messages;
pub mod server;
pub mod viewer;

pub use server::MatchServer;
