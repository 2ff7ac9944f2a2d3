use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::orderbook::BookError;

/// Errors surfaced to REST clients.
///
/// Everything here is the client's fault, so everything renders as a 400
/// with an `{"error": <message>}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidOrder(String),

    #[error(transparent)]
    Book(#[from] BookError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
