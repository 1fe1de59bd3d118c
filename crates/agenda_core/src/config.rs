//! Runtime configuration loaded from environment variables.
//!
//! # Responsibility
//! - Resolve the agenda file path and logging settings for adapters.
//!
//! # Invariants
//! - Missing variables fall back to defaults; present but invalid ones are errors.
//! - `log_dir`, when set, is absolute (required by `init_logging`).

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "AGENDA_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "AGENDA_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "AGENDA_LOG_DIR";

const DEFAULT_DB_PATH: &str = "agenda.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "environment variable {key} is set but empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Snapshot of configuration values consumed by adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AgendaConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = non_empty(&lookup, ENV_DB_PATH)? {
            cfg.db_path = PathBuf::from(value);
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_LEVEL)? {
            cfg.log_level = value;
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_DIR)? {
            let dir = PathBuf::from(&value);
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(value));
            }
            cfg.log_dir = Some(dir);
        }

        Ok(cfg)
    }
}

fn non_empty<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{AgendaConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = AgendaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AgendaConfig::default());
        assert_eq!(cfg.db_path, PathBuf::from("agenda.sqlite3"));
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let log_dir = std::env::temp_dir().join("agenda-logs");
        let log_dir_str = log_dir.to_str().unwrap().to_string();
        let cfg = AgendaConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/contacts.db"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, log_dir_str.as_str()),
        ]))
        .unwrap();

        assert_eq!(cfg.db_path, PathBuf::from("/tmp/contacts.db"));
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_dir, Some(log_dir));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = AgendaConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir("logs".to_string()));
    }

    #[test]
    fn blank_value_is_rejected() {
        let err = AgendaConfig::from_lookup(lookup(&[(ENV_DB_PATH, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue(ENV_DB_PATH));
    }
}
