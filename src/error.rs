//! Application errors and the exit codes they map to.

use std::io;
use std::path::PathBuf;

use hark_transcribe::TranscribeError;
use thiserror::Error;

/// Printed when `--file` is missing.
pub const USAGE_MESSAGE: &str = "Please provide the path to the audio file using the --file flag.";

/// Everything that can stop a run, grouped by who has to fix it.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid command-line input.
    #[error("{0}")]
    Usage(String),

    /// The audio file could not be opened.
    #[error("failed to open {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transcript could not be written to standard output.
    #[error("failed to write transcript")]
    Output(#[source] io::Error),

    /// Configuration could not be loaded or is incomplete.
    #[error("{0:#}")]
    Config(anyhow::Error),

    /// The transcription service call failed.
    #[error(transparent)]
    Service(#[from] TranscribeError),
}

impl AppError {
    pub const EXIT_USAGE: u8 = 1;
    pub const EXIT_IO: u8 = 2;
    pub const EXIT_CONFIG: u8 = 3;
    pub const EXIT_SERVICE: u8 = 4;

    pub fn usage() -> Self {
        Self::Usage(USAGE_MESSAGE.to_string())
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => Self::EXIT_USAGE,
            Self::Io { .. } | Self::Output(_) => Self::EXIT_IO,
            Self::Config(_) => Self::EXIT_CONFIG,
            Self::Service(_) => Self::EXIT_SERVICE,
        }
    }

    /// The message followed by every underlying cause, colon-separated.
    pub fn report(self) -> String {
        format!("{:#}", anyhow::Error::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let io = AppError::Io {
            path: PathBuf::from("missing.wav"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let config = AppError::Config(anyhow::anyhow!("no key"));
        let service = AppError::Service(TranscribeError::NoApiKey);

        assert_eq!(AppError::usage().exit_code(), 1);
        assert_eq!(io.exit_code(), 2);
        assert_eq!(config.exit_code(), 3);
        assert_eq!(service.exit_code(), 4);
    }

    #[test]
    fn usage_displays_instructions() {
        assert_eq!(AppError::usage().to_string(), USAGE_MESSAGE);
    }

    #[test]
    fn report_includes_io_cause_once() {
        let err = AppError::Io {
            path: PathBuf::from("missing.wav"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.report(),
            "failed to open \"missing.wav\": No such file or directory"
        );
    }

    #[test]
    fn report_does_not_repeat_service_prefix() {
        let err = AppError::Service(TranscribeError::TranscriptionFailed(
            "expected value at line 1".into(),
        ));
        assert_eq!(
            err.report(),
            "Transcription failed: expected value at line 1"
        );
    }

    #[test]
    fn config_display_includes_context_chain() {
        let err = AppError::Config(
            anyhow::anyhow!("expected value").context("Failed to parse config file"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to parse config file: expected value"
        );
    }
}
