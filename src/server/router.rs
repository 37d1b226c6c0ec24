//! HTTP and WebSocket routing configuration.
//!
//! JSON endpoints feed the match server; renderers may poll `/match/state`
//! or subscribe on `/ws/viewer`.

use actix_web::web;
use crate::server::api::{get_state, post_chat, post_place, post_start};
use crate::server::match_session::viewer::ws_viewer;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat").route(web::post().to(post_chat)))
        .service(web::resource("/match/start").route(web::post().to(post_start)))
        .service(web::resource("/match/place").route(web::post().to(post_place)))
        .service(web::resource("/match/state").route(web::get().to(get_state)))
        .service(web::resource("/ws/viewer").to(ws_viewer));
}
