//! Coaching feedback handler.

use axum::{Extension, body::Bytes, response::Json};
use tracing::warn;

use crate::{
    feedback::FeedbackService,
    models::{FeedbackResult, FeedbackSource, TelemetrySnapshot},
    types::FeedbackRequest,
};

/// Generate spoken coaching feedback for a telemetry snapshot.
///
/// Always answers 200 with `success: true`. Malformed bodies and upstream
/// failures are answered with a fallback line. The source of the line rides
/// along as a response extension for the access log.
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback text, generated or fallback", body = FeedbackResult)
    )
)]
pub async fn generate_feedback(
    Extension(service): Extension<FeedbackService>,
    body: Bytes,
) -> (Extension<FeedbackSource>, Json<FeedbackResult>) {
    let result = match serde_json::from_slice::<FeedbackRequest>(&body) {
        Ok(req) => service.generate(&TelemetrySnapshot::from(req)).await,
        Err(e) => {
            warn!("Malformed feedback request, using fallback: {e}");
            FeedbackService::fallback()
        }
    };

    (Extension(result.source), Json(result))
}
