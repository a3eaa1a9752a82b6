use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::speech::SpeechError;

/// Errors surfaced by the relay endpoints. The feedback endpoint never
/// returns one of these.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Speech(SpeechError::MissingCredential) => {
                error!("Speech synthesis is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Speech synthesis is not configured".to_string(),
                )
            }
            AppError::Speech(e) => {
                error!("Speech error: {e}");
                (StatusCode::BAD_GATEWAY, "Speech synthesis failed".to_string())
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
