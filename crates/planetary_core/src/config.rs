//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank or unset variables fall back to defaults; resolution never fails.
//! - Defaults live under the OS temp directory.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PLANETARY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PLANETARY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PLANETARY_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "planetary.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "planetary-logs";

/// Resolved settings for opening storage and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn explicit_values_win() {
        let vars = HashMap::from([
            (DB_PATH_ENV, "/srv/planetary/app.sqlite3"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/planetary"),
        ]);
        let config = CoreConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/srv/planetary/app.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/planetary"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(|key| {
            (key == DB_PATH_ENV).then(|| "   ".to_string())
        });

        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("planetary.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.ends_with("planetary-logs"));
    }
}
