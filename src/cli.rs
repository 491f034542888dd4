//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "hark",
    version,
    about = "Transcribe an audio file with the OpenAI transcription API"
)]
pub struct Cli {
    /// Path to the audio file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Transcription model [default: whisper-1]
    #[arg(long)]
    pub model: Option<String>,

    /// Language hint (ISO 639-1 code, e.g. "en")
    #[arg(long)]
    pub language: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_flag_is_optional() {
        let cli = Cli::try_parse_from(["hark"]).unwrap();
        assert!(cli.file.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "hark",
            "--file",
            "sample.wav",
            "--model",
            "gpt-4o-transcribe",
            "--language",
            "en",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("sample.wav")));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-transcribe"));
        assert_eq!(cli.language.as_deref(), Some("en"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn file_flag_needs_a_value() {
        assert!(Cli::try_parse_from(["hark", "--file"]).is_err());
    }
}
