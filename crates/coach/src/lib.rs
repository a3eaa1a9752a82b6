pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod feedback;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod openapi;
pub mod request_id;
pub mod speech;
pub mod types;

use std::{sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    config::Config,
    database::Database,
    feedback::FeedbackService,
    handlers::{delete_account, generate_feedback, health_check, openapi_json, synthesize_speech},
    llm::{TextGenerationClient, TextGenerator},
    request_id::request_id_middleware,
    speech::{SpeechClient, SpeechSynthesizer},
};

/// Everything the handlers need, injected as request extensions.
#[derive(Clone)]
pub struct Services {
    pub feedback: FeedbackService,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub db: Database,
}

impl Services {
    /// Build the production services. The pool may be lazy.
    pub fn from_config(config: &Config, pool: PgPool) -> anyhow::Result<Self> {
        let generator: Arc<dyn TextGenerator> = Arc::new(TextGenerationClient::new(&config.llm)?);
        let speech: Arc<dyn SpeechSynthesizer> = Arc::new(SpeechClient::new(&config.speech)?);

        if config.llm.api_key.is_none() {
            tracing::warn!("LLM_API_KEY is not set, feedback will always use fallback lines");
        }
        if config.speech.api_key.is_none() {
            tracing::warn!("TTS_API_KEY is not set, speech synthesis is disabled");
        }

        Ok(Self {
            feedback: FeedbackService::new(generator, config.llm.model.clone()),
            speech,
            db: Database::new(pool),
        })
    }
}

pub fn create_router(services: Services) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/feedback", post(generate_feedback))
        .route("/tts", post(synthesize_speech))
        .route("/account/delete", post(delete_account))
        .layer(Extension(services.feedback))
        .layer(Extension(services.speech))
        .layer(Extension(services.db))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.database_url)?;

    if config.run_migrations
        && let Err(e) = sqlx::migrate!("./migrations").run(&pool).await
    {
        tracing::warn!("Skipping migrations, database unavailable: {e}");
    }

    let app = create_router(Services::from_config(&config, pool)?);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received Ctrl+C, shutting down...");
            }
        })
        .await?;

    Ok(())
}
