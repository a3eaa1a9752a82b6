//! Text-to-speech relay to the speech-synthesis provider.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech synthesis API key is not configured")]
    MissingCredential,

    #[error("Speech synthesis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Speech synthesis service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected speech synthesis response: {0}")]
    Format(String),
}

/// Voices the app can ask for, mapped to provider voice names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Female,
    Male,
    Gentle,
    Lively,
}

impl Voice {
    const ALL: [Voice; 4] = [Voice::Female, Voice::Male, Voice::Gentle, Voice::Lively];

    /// Resolve a requested voice. App identifiers and provider names are both
    /// accepted; anything else gets the default voice.
    pub fn resolve(requested: Option<&str>) -> Self {
        let Some(name) = requested.map(str::trim) else {
            return Voice::default();
        };
        match name.to_ascii_lowercase().as_str() {
            "female" => Voice::Female,
            "male" => Voice::Male,
            "gentle" => Voice::Gentle,
            "lively" => Voice::Lively,
            _ => Self::ALL
                .into_iter()
                .find(|v| v.provider_name().eq_ignore_ascii_case(name))
                .unwrap_or_default(),
        }
    }

    pub fn provider_name(self) -> &'static str {
        match self {
            Voice::Female => "Cherry",
            Voice::Male => "Ethan",
            Voice::Gentle => "Serena",
            Voice::Lively => "Chelsie",
        }
    }
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return WAV audio.
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<Bytes, SpeechError>;
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    model: &'a str,
    input: SynthesisInput<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
    voice: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynthesisEnvelope {
    output: Option<SynthesisOutput>,
}

#[derive(Debug, Deserialize)]
struct SynthesisOutput {
    audio: Option<SynthesisAudio>,
}

#[derive(Debug, Deserialize)]
struct SynthesisAudio {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

/// Where the synthesized audio can be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioLocation {
    Url(String),
    Inline(Vec<u8>),
}

/// Find the audio in a synthesis response. Inline data wins over a URL.
pub fn parse_synthesis_body(body: &str) -> Result<AudioLocation, SpeechError> {
    let envelope: SynthesisEnvelope = serde_json::from_str(body)
        .map_err(|e| SpeechError::Format(format!("invalid JSON: {e}")))?;

    let audio = envelope
        .output
        .and_then(|o| o.audio)
        .ok_or_else(|| SpeechError::Format("no audio in response output".to_string()))?;

    if let Some(data) = audio.data.filter(|d| !d.is_empty()) {
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| SpeechError::Format(format!("invalid audio data: {e}")))?;
        return Ok(AudioLocation::Inline(bytes));
    }

    audio
        .url
        .filter(|u| !u.is_empty())
        .map(AudioLocation::Url)
        .ok_or_else(|| SpeechError::Format("audio has neither data nor url".to_string()))
}

impl SpeechClient {
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/services/aigc/multimodal-generation/generation",
            self.base_url
        )
    }

    async fn download(&self, url: &str) -> Result<Bytes, SpeechError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Status { status, body });
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechClient {
    #[instrument(skip(self, text, voice), fields(voice = voice.provider_name()))]
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<Bytes, SpeechError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SpeechError::MissingCredential)?;

        let body = SynthesisBody {
            model: &self.model,
            input: SynthesisInput {
                text,
                voice: voice.provider_name(),
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
            error!("Speech synthesis service returned {status}");
            return Err(SpeechError::Status { status, body: text });
        }

        let audio = match parse_synthesis_body(&text)? {
            AudioLocation::Inline(bytes) => Bytes::from(bytes),
            AudioLocation::Url(url) => self.download(&url).await?,
        };
        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}
