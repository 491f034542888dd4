//! OpenAI audio transcription API backend.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{AudioFile, Result, TranscribeError, Transcriber};

/// Base URL of the public OpenAI API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "whisper-1";

const TRANSCRIPTION_PATH: &str = "audio/transcriptions";

/// Configuration for the OpenAI transcription client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// OpenAI API key
    pub api_key: String,

    /// Model to use (defaults to whisper-1)
    pub model: Option<String>,

    /// API base URL (defaults to the public OpenAI API)
    pub api_base: Option<String>,
}

impl OpenAIConfig {
    /// Create a new OpenAI config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            api_base: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the client at a different API base, e.g. a proxy or a test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Get the model name, using default if not set.
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Full URL of the transcription endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        format!("{}/{}", base.trim_end_matches('/'), TRANSCRIPTION_PATH)
    }
}

/// OpenAI transcription API client.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: reqwest::Client,
    config: OpenAIConfig,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Transcriber for OpenAIClient {
    async fn transcribe(&self, audio: AudioFile, language: Option<&str>) -> Result<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(TranscribeError::NoApiKey);
        }

        debug!(
            model = self.config.model(),
            file_name = audio.file_name(),
            audio_bytes = audio.len(),
            content_type = audio.content_type(),
            language = ?language,
            "Sending transcription request to OpenAI"
        );

        let mut form = reqwest::multipart::Form::new()
            .part("file", audio.into_part()?)
            .part(
                "model",
                reqwest::multipart::Part::text(self.config.model().to_string()),
            );

        if let Some(lang) = language {
            form = form.part("language", reqwest::multipart::Part::text(lang.to_string()));
        }

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::ApiError { status, body });
        }

        let whisper_response: WhisperResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::TranscriptionFailed(e.to_string()))?;

        debug!(chars = whisper_response.text.len(), "Transcription received");

        Ok(whisper_response.text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
