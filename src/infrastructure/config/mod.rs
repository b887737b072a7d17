use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};
use crate::domain::video::AnalyzerConfig;

pub const DEFAULT_CONFIG_FILE: &str = "douyin-insight.toml";
pub const ENV_PREFIX: &str = "DOUYIN_INSIGHT_";

/// Application configuration: logging plus analyzer tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter, overridden by `RUST_LOG` (default: "info")
    pub log_level: String,

    pub analysis: AnalyzerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            analysis: AnalyzerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(AppError::ConfigError("log_level must not be empty".to_string()));
        }
        self.analysis.validate().map_err(AppError::ConfigError)
    }
}

/// Layers defaults, an optional TOML file and prefixed environment variables
pub struct ConfigService {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit TOML file instead of `douyin-insight.toml`; it must exist
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<AppConfig> {
        let toml = match &self.config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::ConfigError(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Toml::file(path)
            }
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(toml)
            .merge(Env::prefixed(&self.env_prefix).split("__"))
            .extract()?;

        config.validate()?;

        tracing::debug!(
            config_file = ?self.config_path,
            utc_offset_minutes = config.analysis.utc_offset_minutes,
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn isolated(prefix: &str) -> ConfigService {
        ConfigService::new().with_env_prefix(prefix)
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = isolated("DOUYIN_INSIGHT_TEST_DEFAULTS_").load().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let file = toml_file(
            "log_level = \"debug\"\n\n[analysis]\nutc_offset_minutes = 0\ntop_hashtag_limit = 3\n",
        );

        let config = isolated("DOUYIN_INSIGHT_TEST_TOML_")
            .with_config_path(file.path())
            .load()
            .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.analysis.utc_offset_minutes, 0);
        assert_eq!(config.analysis.top_hashtag_limit, 3);
        assert_eq!(config.analysis.best_hour_count, 3);
    }

    #[test]
    fn test_env_overrides_toml() {
        let file = toml_file("[analysis]\nkeyword_limit = 20\n");
        std::env::set_var("DOUYIN_INSIGHT_TEST_ENV_ANALYSIS__KEYWORD_LIMIT", "7");

        let config = isolated("DOUYIN_INSIGHT_TEST_ENV_")
            .with_config_path(file.path())
            .load()
            .unwrap();

        std::env::remove_var("DOUYIN_INSIGHT_TEST_ENV_ANALYSIS__KEYWORD_LIMIT");
        assert_eq!(config.analysis.keyword_limit, 7);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = toml_file("[analysis]\npareto_ratio = 1.5\n");
        let result = isolated("DOUYIN_INSIGHT_TEST_INVALID_")
            .with_config_path(file.path())
            .load();
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = isolated("DOUYIN_INSIGHT_TEST_MISSING_")
            .with_config_path("/nonexistent/douyin-insight.toml")
            .load();
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
