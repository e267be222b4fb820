use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LyrseekError, Result};

/// Global lyrseek configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How many lyrics pages to scan per search
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Politeness delay between page fetches, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub request_delay_ms: u64,

    /// Whisper model size (tiny, base, small, medium, large)
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Force a transcription language (e.g. "en"); autodetect when unset
    #[serde(default)]
    pub language: Option<String>,

    /// Let the Claude CLI review candidates when it is installed
    #[serde(default = "default_true")]
    pub use_agent: bool,
}

fn default_max_pages() -> usize {
    crate::pipeline::DEFAULT_MAX_PAGES
}

fn default_delay_ms() -> u64 {
    crate::pipeline::DEFAULT_DELAY_MS
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            request_delay_ms: default_delay_ms(),
            whisper_model: default_whisper_model(),
            language: None,
            use_agent: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| LyrseekError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "lyrseek")
            .ok_or_else(|| LyrseekError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
