//! JSON endpoints for the chat bridge, the streamer controls, and polling renderers.

use actix_web::{HttpResponse, web};
use log::debug;
use serde_json::json;

use crate::server::error::ApiError;
use crate::server::match_session::messages::{ChatLine, GetSnapshot, PlaceObject, StartMatch};
use crate::server::state::AppState;

/// `POST /chat`: run one chat line, return whispers and match events.
pub async fn post_chat(
    data: web::Data<AppState>,
    body: web::Json<ChatLine>,
) -> Result<HttpResponse, ApiError> {
    let line = body.into_inner();
    if line.identity.trim().is_empty() {
        return Err(ApiError::BadRequest("identity must not be empty".to_string()));
    }
    let outcome = data.match_server.send(line).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// `POST /match/start`
pub async fn post_start(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let started = data.match_server.send(StartMatch).await?;
    debug!("[Api] Start requested, started={started}");
    Ok(HttpResponse::Ok().json(json!({ "started": started })))
}

/// `POST /match/place`
pub async fn post_place(
    data: web::Data<AppState>,
    body: web::Json<PlaceObject>,
) -> Result<HttpResponse, ApiError> {
    let placed = data.match_server.send(body.into_inner()).await??;
    Ok(HttpResponse::Ok().json(json!({ "placed": placed })))
}

/// `GET /match/state`
pub async fn get_state(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let snapshot = data.match_server.send(GetSnapshot).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
