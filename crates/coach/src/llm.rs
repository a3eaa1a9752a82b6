//! Client for the remote text-generation service.
//!
//! The service speaks the DashScope generation protocol: messages go in under
//! `input.messages`, sampling settings under `parameters`, and the generated
//! text comes back either as `output.text` or, in message format, as
//! `output.choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

/// Sampling temperature for feedback. Above the service default so that
/// repeated calls with similar telemetry do not sound identical.
pub const FEEDBACK_TEMPERATURE: f32 = 0.8;

#[derive(Debug, Error)]
pub enum RemoteGenerationError {
    #[error("Text generation API key is not configured")]
    MissingCredential,

    #[error("Text generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Text generation service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected text generation response: {0}")]
    Format(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// One call to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can turn a list of messages into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, RemoteGenerationError>;
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// HTTP implementation of [`TextGenerator`].
#[derive(Debug, Clone)]
pub struct TextGenerationClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TextGenerationClient {
    pub fn new(config: &LlmConfig) -> Result<Self, RemoteGenerationError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/services/aigc/text-generation/generation", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    input: GenerationInput<'a>,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationInput<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    temperature: f32,
    max_tokens: u32,
    result_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerationEnvelope {
    output: Option<GenerationOutput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerationOutput {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    choices: Vec<GenerationChoice>,
}

#[derive(Debug, Deserialize)]
struct GenerationChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The two shapes generated text arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedText {
    /// `output.text`
    Plain(String),
    /// `output.choices[0].message.content`
    Message(String),
}

impl GeneratedText {
    pub fn into_inner(self) -> String {
        match self {
            GeneratedText::Plain(text) | GeneratedText::Message(text) => text,
        }
    }
}

impl GenerationOutput {
    /// Prefer the plain text field, then the first choice. Blank strings do
    /// not count.
    pub fn resolve(self) -> Option<GeneratedText> {
        let non_blank = |s: String| (!s.trim().is_empty()).then_some(s);

        if let Some(text) = self.text.and_then(non_blank) {
            return Some(GeneratedText::Plain(text));
        }
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .and_then(non_blank)
            .map(GeneratedText::Message)
    }
}

/// Extract generated text from a raw response body.
pub fn parse_generation_body(body: &str) -> Result<GeneratedText, RemoteGenerationError> {
    let envelope: GenerationEnvelope = serde_json::from_str(body)
        .map_err(|e| RemoteGenerationError::Format(format!("invalid JSON: {e}")))?;

    envelope
        .output
        .unwrap_or_default()
        .resolve()
        .ok_or_else(|| RemoteGenerationError::Format("no text in response output".to_string()))
}

#[async_trait]
impl TextGenerator for TextGenerationClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, RemoteGenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RemoteGenerationError::MissingCredential)?;

        let body = GenerationBody {
            model: &request.model,
            input: GenerationInput {
                messages: &request.messages,
            },
            parameters: GenerationParameters {
                temperature: request.temperature,
                max_tokens: request.max_tokens,
                result_format: "message",
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Text generation service returned {status}");
            return Err(RemoteGenerationError::Status { status, body: text });
        }

        let generated = parse_generation_body(&text)?.into_inner();
        debug!("Generated {} chars", generated.chars().count());
        Ok(generated)
    }
}
