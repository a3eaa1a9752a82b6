//! Request correlation and access logging.
//!
//! Uses the client's `x-request-id` when present, otherwise generates a UUID.
//! Every request runs inside a span carrying the ID, and the ID is echoed back
//! in the response headers. The completion log carries the latency and, for
//! the feedback route, whether the line was generated or taken from the
//! fallback pool.

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::models::FeedbackSource;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID as seen by handlers, stored in the request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response<Body> {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(request).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value);
        }

        let status = response.status().as_u16();
        let source = response.extensions().get::<FeedbackSource>().copied();
        if response.status().is_server_error() {
            tracing::error!(status, latency_ms, "Request failed");
        } else if let Some(source) = source {
            tracing::info!(status, latency_ms, ?source, "Feedback served");
        } else {
            tracing::info!(status, latency_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
