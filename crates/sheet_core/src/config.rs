//! Runtime configuration for hosts embedding the sheet core.
//!
//! # Responsibility
//! - Collect log level, optional log directory and seeding choice.
//! - Read overrides from `SHEET_*` environment variables.
//!
//! # Invariants
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - Loading never panics; malformed values surface as `ConfigError`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "SHEET_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SHEET_LOG_DIR";
pub const ENV_SEED: &str = "SHEET_SEED";

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Log level is not one of the supported names.
    InvalidLogLevel(String),
    /// Seed flag is not a recognized boolean word.
    InvalidSeedFlag(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::InvalidSeedFlag(value) => write!(
                f,
                "{ENV_SEED}: unsupported value `{value}`; expected 1|0|true|false|yes|no|on|off"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Sheet core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    /// Normalized log level name.
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Start from the built-in starter sheet instead of an empty one.
    pub seed: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            seed: true,
        }
    }
}

impl SheetConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to `SheetConfig::default()`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(seed) = read(ENV_SEED) {
            config.seed = parse_flag(&seed).ok_or(ConfigError::InvalidSeedFlag(seed))?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SheetConfig, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_SEED};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = SheetConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SheetConfig::default());
        assert!(config.seed);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_are_normalized() {
        let config = SheetConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_LOG_DIR, "/var/log/sheet "),
            (ENV_SEED, "off"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/sheet")));
        assert!(!config.seed);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = SheetConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let err = SheetConfig::from_lookup(lookup(&[(ENV_SEED, "maybe")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSeedFlag("maybe".to_string()));
    }
}
