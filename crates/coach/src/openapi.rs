//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{
    database::DeletionReport,
    handlers::{__path_delete_account, __path_generate_feedback, __path_health_check, __path_synthesize_speech},
    models::{CoachStyle, FeedbackResult},
    types::{AccountDeletionResponse, ErrorResponse, FeedbackRequest, SpeechRequest},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stride Coach API",
        description = "Real-time running feedback, speech relay and account management"
    ),
    paths(generate_feedback, synthesize_speech, delete_account, health_check),
    components(schemas(
        FeedbackRequest,
        FeedbackResult,
        CoachStyle,
        SpeechRequest,
        AccountDeletionResponse,
        DeletionReport,
        ErrorResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "feedback", description = "Coaching feedback generation"),
        (name = "speech", description = "Text-to-speech relay"),
        (name = "account", description = "Account management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/feedback", "/tts", "/account/delete", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
