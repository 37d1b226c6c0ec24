//! Main entry point for the Fruit Gunch host.
//!
//! Starts the match server actor and the HTTP server that the chat bridge,
//! the streamer controls and the renderers talk to.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use config::game::GameConfig;
use config::server::ServerConfig;
use game::state::MatchState;
use server::match_session::MatchServer;

pub mod config;
mod server;
mod game;
#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Default to info level unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let game_config = GameConfig::from_env();
    let server_config = ServerConfig::from_env();

    // The match server owns the only copy of the game state.
    let match_server = MatchServer::new(MatchState::new(game_config)).start();
    let state = web::Data::new(server::state::AppState::new(match_server));

    info!(
        "[Server] Listening on {}:{} ({}x{} grid, up to {} players)",
        server_config.host,
        server_config.port,
        game_config.width,
        game_config.height,
        game_config.max_players
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
