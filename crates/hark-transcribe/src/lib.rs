//! Transcription backend library for hark.
//!
//! This crate provides a trait-based abstraction for audio transcription,
//! with an implementation for OpenAI's audio transcription API.

mod audio;
mod openai;

use async_trait::async_trait;
pub use audio::AudioFile;
pub use openai::{DEFAULT_API_BASE, DEFAULT_MODEL, OpenAIClient, OpenAIConfig};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during transcription.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("API returned {status}: {body}")]
    ApiError { status: StatusCode, body: String },

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid audio format: {0}")]
    InvalidAudioFormat(String),

    #[error("Network error")]
    NetworkError(#[from] reqwest::Error),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
}

impl TranscribeError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Network failures, timeouts, rate limiting and server-side errors are
    /// retryable; bad credentials or a rejected file are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError(_) => true,
            Self::ApiError { status, .. } => {
                *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error()
            }
            Self::NoApiKey | Self::InvalidAudioFormat(_) | Self::TranscriptionFailed(_) => false,
        }
    }
}

/// Result type for transcription operations.
pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Trait for transcription backends.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file to text.
    ///
    /// # Arguments
    /// * `audio` - The open audio file. It is consumed so the handle is
    ///             released as soon as the request finishes, whatever the outcome.
    /// * `language` - Optional language hint (ISO 639-1 code, e.g., "en")
    async fn transcribe(&self, audio: AudioFile, language: Option<&str>) -> Result<String>;

    /// Returns the name of this transcriber for logging/debugging.
    fn name(&self) -> &str;
}
