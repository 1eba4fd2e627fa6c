use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub cloud: CloudConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Recipe search API credentials.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudConfig {
    /// Identity provider REST endpoint.
    pub auth_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Document database REST endpoint.
    pub database_url: String,
    pub timeout_secs: u64,
    /// Keep accounts and user documents in memory instead of calling the
    /// cloud services.
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

fn default_preferences_path() -> String {
    "recipebook.preferences.json".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (RECIPEBOOK__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:recipebook.db")?
            .set_default("database.max_connections", 5)?
            .set_default("search.base_url", "https://api.edamam.com")?
            .set_default("search.timeout_secs", 15)?
            .set_default("cloud.auth_url", "https://identitytoolkit.googleapis.com")?
            .set_default("cloud.database_url", "http://127.0.0.1:9000")?
            .set_default("cloud.timeout_secs", 15)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("RECIPEBOOK")
                .separator("__")
                .try_parsing(true),
        );

        // Also support legacy environment variables without prefix
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(app_id) = env::var("EDAMAM_APP_ID") {
            builder = builder.set_override("search.app_id", app_id)?;
        }
        if let Ok(app_key) = env::var("EDAMAM_APP_KEY") {
            builder = builder.set_override("search.app_key", app_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.search.timeout_secs == 0 || self.cloud.timeout_secs == 0 {
            return Err("Timeouts must be greater than 0".to_string());
        }
        if !self.cloud.offline && self.cloud.api_key.is_empty() {
            return Err("Cloud api_key is required unless cloud.offline is set".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            search: SearchConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                app_id: "id".to_string(),
                app_key: "key".to_string(),
                timeout_secs: 5,
            },
            cloud: CloudConfig {
                auth_url: "http://127.0.0.1:2".to_string(),
                api_key: "api-key".to_string(),
                database_url: "http://127.0.0.1:3".to_string(),
                timeout_secs: 5,
                offline: false,
            },
            observability: ObservabilityConfig::default(),
            preferences: PreferencesConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = config();
        config.search.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let mut config = config();
        config.cloud.api_key = String::new();
        assert!(config.validate().is_err());

        config.cloud.offline = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_defaults() {
        let config = Config::load(Some("does/not/exist.toml".to_string())).unwrap();

        assert_eq!(config.search.timeout_secs, 15);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.preferences.path, "recipebook.preferences.json");
    }
}
