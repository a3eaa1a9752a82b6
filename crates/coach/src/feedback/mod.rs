//! Coaching feedback pipeline.
//!
//! snapshot → [`stats`] → [`prompt`] → remote generation → [`sanitize`].
//! Any failure along the way is logged and answered from [`fallback`]; the
//! caller always gets a successful result.

pub mod fallback;
pub mod prompt;
pub mod sanitize;
pub mod stats;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    llm::{ChatMessage, FEEDBACK_TEMPERATURE, GenerationRequest, RemoteGenerationError, TextGenerator},
    models::{FeedbackResult, FeedbackSource, TelemetrySnapshot},
};

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Invalid telemetry: {0}")]
    InvalidTelemetry(String),

    #[error(transparent)]
    Remote(#[from] RemoteGenerationError),

    #[error("Generated feedback was empty after cleanup")]
    EmptyFeedback,
}

#[derive(Clone)]
pub struct FeedbackService {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl FeedbackService {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Produce feedback for a snapshot. Never fails.
    pub async fn generate(&self, snapshot: &TelemetrySnapshot) -> FeedbackResult {
        match self.try_generate(snapshot).await {
            Ok(text) => {
                info!(mode = ?snapshot.mode(), style = snapshot.coach_style.as_str(), "Generated feedback");
                FeedbackResult::new(text, FeedbackSource::Generated)
            }
            Err(e) => {
                warn!("Feedback generation failed, using fallback: {e}");
                Self::fallback()
            }
        }
    }

    /// A result drawn from the fallback pool.
    pub fn fallback() -> FeedbackResult {
        let text = fallback::pick(&mut rand::thread_rng());
        FeedbackResult::new(text.to_string(), FeedbackSource::Fallback)
    }

    async fn try_generate(&self, snapshot: &TelemetrySnapshot) -> Result<String, FeedbackError> {
        snapshot.validate()?;

        let prompt = prompt::build(snapshot);
        let request = GenerationRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(prompt.system), ChatMessage::user(prompt.user)],
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: prompt.max_tokens,
        };

        let raw = self.generator.generate(&request).await?;
        let text = sanitize::sanitize(&raw);
        if text.is_empty() {
            return Err(FeedbackError::EmptyFeedback);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{CoachStyle, FeedbackMode};

    struct Recording {
        reply: Result<String, ()>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl Recording {
        fn replying(reply: Result<&str, ()>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Recording {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<String, RemoteGenerationError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map_err(|_| RemoteGenerationError::MissingCredential)
        }
    }

    #[tokio::test]
    async fn test_generated_feedback_is_sanitized() {
        let generator = Recording::replying(Ok("\"保持住，\n配速很稳！\""));
        let service = FeedbackService::new(generator.clone(), "qwen-plus");

        let result = service.generate(&TelemetrySnapshot::new(5.5, 3.2, 1200.0)).await;
        assert!(result.success);
        assert_eq!(result.source, FeedbackSource::Generated);
        assert_eq!(result.feedback, "保持住， 配速很稳！");

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "qwen-plus");
        assert_eq!(seen[0].temperature, FEEDBACK_TEMPERATURE);
        assert_eq!(seen[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let service = FeedbackService::new(Recording::replying(Err(())), "qwen-plus");
        let result = service.generate(&TelemetrySnapshot::new(5.0, 1.0, 300.0)).await;
        assert!(result.success);
        assert_eq!(result.source, FeedbackSource::Fallback);
        assert!(fallback::is_fallback(&result.feedback));
    }

    #[tokio::test]
    async fn test_blank_generation_falls_back() {
        let service = FeedbackService::new(Recording::replying(Ok(" \"\" ")), "qwen-plus");
        let result = service.generate(&TelemetrySnapshot::new(5.0, 1.0, 300.0)).await;
        assert_eq!(result.source, FeedbackSource::Fallback);
    }

    #[tokio::test]
    async fn test_invalid_snapshot_skips_remote_call() {
        let generator = Recording::replying(Ok("不会用到"));
        let service = FeedbackService::new(generator.clone(), "qwen-plus");

        let result = service.generate(&TelemetrySnapshot::new(-1.0, 1.0, 300.0)).await;
        assert_eq!(result.source, FeedbackSource::Fallback);
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_uses_summary_budget() {
        let generator = Recording::replying(Ok("整体表现不错。"));
        let service = FeedbackService::new(generator.clone(), "qwen-plus");

        let mut snapshot = TelemetrySnapshot::new(5.0, 3.0, 900.0);
        snapshot.coach_style = CoachStyle::Strict;
        snapshot.km_splits = Some(vec![300.0, 300.0, 300.0]);
        assert_eq!(snapshot.mode(), FeedbackMode::Summary);

        service.generate(&snapshot).await;
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, prompt::SUMMARY_MAX_TOKENS);
    }
}
