use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyrseekError {
    // Fetch and extraction misses are recovered locally by dropping the
    // candidate, so neither gets a variant here.
    #[error("Search backend unavailable: {0}")]
    SearchUnavailable(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not write results file {path}: {reason}")]
    PersistenceError { path: String, reason: String },

    #[error("Whisper CLI not installed: {0}")]
    WhisperNotInstalled(String),

    #[error("Whisper CLI failed: {0}")]
    WhisperFailed(String),

    #[error("Claude CLI failed: {0}")]
    ClaudeFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LyrseekError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LyrseekError::SearchUnavailable(_) => Some(
                "Check your internet connection; the search backend may also be\nrate limiting. Wait a minute and retry."
            ),
            LyrseekError::WhisperNotInstalled(_) => Some(
                "Install the Whisper CLI: pip install openai-whisper (requires ffmpeg)"
            ),
            LyrseekError::WhisperFailed(_) => Some(
                "Check that ffmpeg is on PATH and the audio file is readable"
            ),
            LyrseekError::PersistenceError { .. } => Some(
                "Check that the output directory exists and is writable"
            ),
            LyrseekError::ConfigError(_) => Some(
                "Run `lyrseek doctor` to check your setup"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LyrseekError>;
