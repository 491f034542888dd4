//! Transcribe a local audio file with a remote speech-to-text service.

pub use hark_core::{APP_NAME, Config, ConfigManager, DEFAULT_LOG_LEVEL, LOG_ENV};
pub use hark_transcribe::{AudioFile, OpenAIClient, OpenAIConfig, TranscribeError, Transcriber};

pub mod app;
pub mod cli;
pub mod error;

pub use app::{Backend, connect, resolve_config, resolve_config_with, run};
pub use cli::Cli;
pub use error::{AppError, USAGE_MESSAGE};
