use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

const DEFAULT_FILTER: &str = "info,neechat=debug,tower_http=debug";

impl TracingConfig {
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        let json_format = logging.enable_json
            || std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false);

        let filter = if logging.level.trim().is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            format!("{},tower_http=debug", logging.level.trim())
        };

        Self {
            environment: environment.to_string(),
            json_format,
            filter,
        }
    }
}
