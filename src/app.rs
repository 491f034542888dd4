//! One transcription run: open the file, call the backend, print the text.

use std::io::Write;
use std::path::Path;

use anyhow::anyhow;
use hark_core::{API_KEY_ENV, Config, ConfigManager};
use hark_transcribe::{AudioFile, OpenAIClient, OpenAIConfig, Transcriber};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::error::AppError;

/// A transcriber plus the options it is called with.
pub struct Backend {
    pub transcriber: Box<dyn Transcriber>,
    pub language: Option<String>,
}

impl Backend {
    /// Builds the OpenAI backend from a resolved config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api_key = config.key_openai().ok_or_else(|| {
            AppError::Config(anyhow!(
                "OpenAI API key is not set; export {} or set openai_key in the config file",
                API_KEY_ENV
            ))
        })?;

        let mut openai = OpenAIConfig::new(api_key);
        if let Some(model) = config.model() {
            openai = openai.with_model(model);
        }
        if let Some(api_base) = config.api_base() {
            openai = openai.with_api_base(api_base);
        }

        Ok(Self {
            transcriber: Box::new(OpenAIClient::new(openai)),
            language: config.language().map(str::to_string),
        })
    }
}

/// Resolves configuration with precedence: flags, then environment, then file.
pub fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    resolve_config_with(cli, |name| std::env::var(name).ok())
}

/// Like [`resolve_config`], reading environment variables through `lookup`.
pub fn resolve_config_with<F>(cli: &Cli, lookup: F) -> Result<Config, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_config_path(path),
        None => ConfigManager::new().map_err(AppError::Config)?,
    };
    let mut config = manager.resolve_with(lookup).map_err(AppError::Config)?;

    if let Some(model) = &cli.model {
        config.model = Some(model.clone());
    }
    if let Some(language) = &cli.language {
        config.language = Some(language.clone());
    }

    Ok(config)
}

/// Default backend factory used by the binary.
pub fn connect(cli: &Cli) -> Result<Backend, AppError> {
    Backend::from_config(&resolve_config(cli)?)
}

/// Runs one transcription and writes the transcript plus a newline to `out`.
///
/// `connect` is only called once the audio file is open, so a missing flag
/// or an unreadable file never builds a client or touches the network.
pub async fn run<W, F>(cli: &Cli, out: &mut W, connect: F) -> Result<(), AppError>
where
    W: Write,
    F: FnOnce(&Cli) -> Result<Backend, AppError>,
{
    let path = cli.file.as_deref().ok_or_else(AppError::usage)?;
    let audio = open_audio(path).await?;

    let backend = connect(cli)?;
    if audio.is_empty() {
        warn!(file = audio.file_name(), "Audio file is empty");
    }
    info!(
        backend = backend.transcriber.name(),
        file = audio.file_name(),
        bytes = audio.len(),
        "Transcribing"
    );

    let text = backend
        .transcriber
        .transcribe(audio, backend.language.as_deref())
        .await?;

    writeln!(out, "{}", text).map_err(AppError::Output)?;
    out.flush().map_err(AppError::Output)?;

    debug!("Transcript written");
    Ok(())
}

async fn open_audio(path: &Path) -> Result<AudioFile, AppError> {
    AudioFile::open(path).await.map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
