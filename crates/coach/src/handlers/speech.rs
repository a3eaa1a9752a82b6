//! Text-to-speech relay handler.

use std::sync::Arc;

use axum::{
    Extension,
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    errors::AppError,
    speech::{SpeechSynthesizer, Voice},
    types::SpeechRequest,
};

/// Synthesize speech for the given text and return WAV audio.
#[utoipa::path(
    post,
    path = "/tts",
    tag = "speech",
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "WAV audio", body = Vec<u8>, content_type = "audio/wav"),
        (status = 400, description = "Missing text", body = crate::types::ErrorResponse),
        (status = 502, description = "Speech provider failed", body = crate::types::ErrorResponse)
    )
)]
pub async fn synthesize_speech(
    Extension(synthesizer): Extension<Arc<dyn SpeechSynthesizer>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: SpeechRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {e}")))?;

    req.validate().map_err(|e| {
        let messages: Vec<String> = e
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            })
            .collect();
        AppError::InvalidInput(messages.join(", "))
    })?;

    let voice = Voice::resolve(req.voice.as_deref());
    let audio = synthesizer.synthesize(req.text.trim(), voice).await?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], audio).into_response())
}
