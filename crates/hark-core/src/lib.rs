//! Core configuration for hark.
//!
//! Holds the settings every hark crate agrees on: where the config file
//! lives, which environment variables override it, and the defaults used
//! when neither says anything.

mod config;

pub use config::{Config, ConfigManager};

/// Application name
pub const APP_NAME: &str = "hark";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "HARK_LOG";

/// Environment variable holding the OpenAI API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the transcription model
pub const MODEL_ENV: &str = "HARK_MODEL";

/// Environment variable overriding the transcription language hint
pub const LANGUAGE_ENV: &str = "HARK_LANGUAGE";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "HARK_API_BASE";
