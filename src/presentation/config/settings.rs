use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub relay: RelaySettings,
    pub history: HistorySettings,
    pub readme: ReadmeSettings,
    pub logging: LoggingSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    Scaffold,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub connect_timeout_seconds: u64,
    /// Whole-request timeout for the upstream call; 0 disables it.
    pub request_timeout_seconds: u64,
    pub scaffold_delay_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            connect_timeout_seconds: 10,
            request_timeout_seconds: 0,
            scaffold_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Upper bound on one streamed reply; 0 disables it.
    pub stream_timeout_seconds: u64,
    pub sse_keep_alive_seconds: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            stream_timeout_seconds: 120,
            sse_keep_alive_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub backend: HistoryBackend,
    pub path: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::File,
            path: "history.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadmeSettings {
    pub path: String,
}

impl Default for ReadmeSettings {
    fn default() -> Self {
        Self {
            path: "markdowns/first.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,neechat=debug".to_string(),
            enable_json: false,
        }
    }
}

/// Backing service for the unfinished login flow. Read but never used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub url: String,
    pub key: String,
}

impl Settings {
    /// Layers `appsettings.{env}.toml` (optional) under `APP__*` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;
        settings.apply_api_key_fallback(std::env::var(API_KEY_ENV_VAR).ok());
        Ok(settings)
    }

    /// Fills an empty `llm.api_key` from the conventional variable.
    pub fn apply_api_key_fallback(&mut self, api_key: Option<String>) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
                self.llm.api_key = key;
            }
        }
    }

    pub fn stream_timeout(&self) -> Option<std::time::Duration> {
        match self.relay.stream_timeout_seconds {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}
