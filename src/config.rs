use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::core::RematchPolicy;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Invalid configuration: {0} must be a finite number")]
    NonFinite(&'static str),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub supply: SupplySettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Swipe engine tunables
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiscoverySettings {
    #[serde(default = "default_swipe_threshold")]
    #[validate(range(exclusive_min = 0.0))]
    pub swipe_threshold_px: f64,
    #[serde(default = "default_hint_threshold")]
    #[validate(range(min = 0.0))]
    pub hint_threshold_px: f64,
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_match_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub match_probability: f64,
    /// Fixed seed for the match decider; entropy when unset
    #[serde(default)]
    pub match_seed: Option<u64>,
    #[serde(default)]
    pub rematch: RematchPolicy,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            swipe_threshold_px: default_swipe_threshold(),
            hint_threshold_px: default_hint_threshold(),
            settle_delay_ms: default_settle_delay(),
            match_probability: default_match_probability(),
            match_seed: None,
            rematch: RematchPolicy::default(),
        }
    }
}

impl DiscoverySettings {
    /// Range checks pass NaN through, so reject it here
    fn check_finite(&self) -> Result<(), SettingsError> {
        let fields = [
            ("discovery.swipe_threshold_px", self.swipe_threshold_px),
            ("discovery.hint_threshold_px", self.hint_threshold_px),
            ("discovery.match_probability", self.match_probability),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(SettingsError::NonFinite(name)),
            None => Ok(()),
        }
    }
}

fn default_swipe_threshold() -> f64 { 100.0 }
fn default_hint_threshold() -> f64 { 30.0 }
fn default_settle_delay() -> u64 { 300 }
fn default_match_probability() -> f64 { 0.3 }

/// Mock candidate supply
#[derive(Debug, Clone, Deserialize)]
pub struct SupplySettings {
    #[serde(default = "default_fetch_delay")]
    pub fetch_delay_ms: u64,
}

impl Default for SupplySettings {
    fn default() -> Self {
        Self { fetch_delay_ms: default_fetch_delay() }
    }
}

fn default_fetch_delay() -> u64 { 300 }

/// Mock chat partner
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { reply_delay_ms: default_reply_delay() }
    }
}

fn default_reply_delay() -> u64 { 2000 }

/// Mock sign-in latency
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_login_delay")]
    pub login_delay_ms: u64,
    #[serde(default = "default_register_delay")]
    pub register_delay_ms: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay(),
            register_delay_ms: default_register_delay(),
        }
    }
}

fn default_login_delay() -> u64 { 500 }
fn default_register_delay() -> u64 { 800 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTORBEE__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTORBEE__DISCOVERY__MATCH_PROBABILITY -> discovery.match_probability
            .add_source(environment())
            .build()?;

        let settings = apply_log_overrides(settings)?;
        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Parse settings from TOML text, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, SettingsError> {
        let settings: Settings = settings.try_deserialize()?;
        settings.discovery.check_finite()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MENTORBEE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the conventional LOG_LEVEL / LOG_FORMAT variables
fn apply_log_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_discovery() {
        let discovery = DiscoverySettings::default();
        assert_eq!(discovery.swipe_threshold_px, 100.0);
        assert_eq!(discovery.hint_threshold_px, 30.0);
        assert_eq!(discovery.settle_delay_ms, 300);
        assert_eq!(discovery.match_probability, 0.3);
        assert_eq!(discovery.rematch, RematchPolicy::Append);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [discovery]
            match_probability = 0.5
            rematch = "skip"

            [chat]
            reply_delay_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.discovery.match_probability, 0.5);
        assert_eq!(settings.discovery.rematch, RematchPolicy::Skip);
        assert_eq!(settings.discovery.swipe_threshold_px, 100.0);
        assert_eq!(settings.chat.reply_delay_ms, 10);
        assert_eq!(settings.auth.login_delay_ms, 500);
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let result = Settings::from_toml_str("[discovery]\nmatch_probability = 1.5\n");
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let result = Settings::from_toml_str("[discovery]\nswipe_threshold_px = 0.0\n");
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_nan_probability_rejected() {
        let result = Settings::from_toml_str("[discovery]\nmatch_probability = nan\n");
        assert!(matches!(
            result,
            Err(SettingsError::NonFinite("discovery.match_probability"))
        ));

        let result = Settings::from_toml_str("[discovery]\nhint_threshold_px = inf\n");
        assert!(matches!(result, Err(SettingsError::NonFinite(_))));
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let path = std::env::temp_dir().join(format!("mentorbee-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[discovery]\nmatch_probability = 0.5\nrematch = \"skip\"\n").unwrap();
        std::env::set_var("MENTORBEE__CHAT__REPLY_DELAY_MS", "25");

        let result = Settings::load_from(&path);
        std::env::remove_var("MENTORBEE__CHAT__REPLY_DELAY_MS");
        std::fs::remove_file(&path).unwrap();

        let settings = result.unwrap();
        assert_eq!(settings.discovery.match_probability, 0.5);
        assert_eq!(settings.discovery.rematch, RematchPolicy::Skip);
        assert_eq!(settings.chat.reply_delay_ms, 25);
        assert_eq!(settings.supply.fetch_delay_ms, 300);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("mentorbee-does-not-exist.toml");
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Config(_))));
    }

    #[test]
    fn test_sample_config_parses_with_toml() {
        let text = include_str!("../config/default.toml");
        let raw: toml::Value = toml::from_str(text).unwrap();
        assert!(raw.get("discovery").is_some());
        assert!(Settings::from_toml_str(text).is_ok());
    }
}
