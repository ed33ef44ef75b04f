mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    API_KEY_ENV_VAR, AuthSettings, HistoryBackend, HistorySettings, LlmProvider, LlmSettings,
    LoggingSettings, ReadmeSettings, RelaySettings, ServerSettings, Settings,
};
