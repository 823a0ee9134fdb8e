//! Configuration management for the DarConnect console

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

use crate::services::schedule_grid::DecodePolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Root URL of the remote service, without trailing slash
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Where the current session record is persisted between invocations.
    /// An empty value keeps the session in memory only.
    pub file: String,
}

impl SessionConfig {
    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.file.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    pub decode_policy: DecodePolicy,
    /// Licenses expiring within this many days are flagged
    pub license_warning_days: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DARCONNECT__API__BASE_URL, DARCONNECT__LOGGING__LEVEL, ...
            .add_source(
                Environment::with_prefix("DARCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .set_override_option("session.file", env::var("DARCONNECT_SESSION_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: ".darconnect-session.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            decode_policy: DecodePolicy::Lenient,
            license_warning_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.schedule.decode_policy, DecodePolicy::Lenient);
        assert_eq!(config.schedule.license_warning_days, 30);
    }

    #[test]
    fn test_session_path() {
        let mut session = SessionConfig::default();
        assert_eq!(session.path(), Some(PathBuf::from(".darconnect-session.json")));
        session.file = "  ".to_string();
        assert_eq!(session.path(), None);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("api.base_url", "https://transport.example.org")
            .and_then(|b| b.set_override("api.timeout_secs", 5))
            .and_then(|b| b.set_override("schedule.decode_policy", "strict"))
            .and_then(|b| b.set_override("schedule.license_warning_days", 15))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("valid configuration");

        assert_eq!(config.api.base_url, "https://transport.example.org");
        assert_eq!(config.schedule.decode_policy, DecodePolicy::Strict);
        assert_eq!(config.logging.level, "info");
    }
}
