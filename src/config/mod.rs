use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub smtp: SmtpConfig,
    pub storage: StorageConfig,
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key. Usually left empty in the file and supplied via OPENAI_API_KEY.
    pub api_key: Option<String>,
    pub api_base: String,
    /// Chat model used for summaries.
    pub model: String,
    /// Speech-to-text model used for transcription.
    pub transcription_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address. Falls back to `username` when unset.
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the recordings directory (default: data dir).
    pub recordings_dir: Option<PathBuf>,
    /// Override for the transcripts directory (default: data dir).
    pub transcripts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub command_prefix: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            transcription_model: "whisper-1".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: None,
            password: None,
            from: None,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default().with_env_overrides();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config.with_env_overrides())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Credentials never live in the config file by default; the environment
    /// wins whenever a variable is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Ok(host) = std::env::var("SMTP_SERVER") {
            self.smtp.host = host;
        }
        if let Ok(port) = std::env::var("SMTP_PORT") {
            if let Ok(port) = port.parse() {
                self.smtp.port = port;
            }
        }
        if let Ok(username) = std::env::var("EMAIL_USERNAME") {
            self.smtp.username = Some(username);
        }
        if let Ok(password) = std::env::var("EMAIL_PASSWORD") {
            self.smtp.password = Some(password);
        }
        self
    }

    pub fn recordings_dir(&self) -> Result<PathBuf> {
        match &self.storage.recordings_dir {
            Some(dir) => Ok(dir.clone()),
            None => global::recordings_dir(),
        }
    }

    pub fn transcripts_dir(&self) -> Result<PathBuf> {
        match &self.storage.transcripts_dir {
            Some(dir) => Ok(dir.clone()),
            None => global::transcripts_dir(),
        }
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
