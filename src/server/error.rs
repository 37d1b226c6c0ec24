//! Centralized helpers for WebSocket and HTTP error responses.
//!
//! All error bodies share one JSON shape with a code, a message and an
//! optional context string.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

use crate::game::errors::GameError;

/// Formats a WebSocket error message as a JSON string.
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "Error",
        "data": { "code": code, "message": message, "context": context.unwrap_or("") }
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": { "code": code, "message": message, "context": context.unwrap_or("") }
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("match server unavailable: {0}")]
    Mailbox(#[from] actix::MailboxError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Game(GameError::OutOfBounds { .. }) => "OUT_OF_BOUNDS",
            ApiError::Game(GameError::GridFull) => "GRID_FULL",
            ApiError::Mailbox(_) => "INTERNAL",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Game(_) => StatusCode::BAD_REQUEST,
            ApiError::Mailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        http_error_response(self.code(), &self.to_string(), None, self.status_code())
    }
}
