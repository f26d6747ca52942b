//! Environment-driven configuration.

use std::env;

use hot100_core::policy::IntervalPolicy;

use crate::error::ConfigError;

/// Environment variable naming the SQLite database URL.
pub const ENV_DATABASE_URL: &str = "HOT100_DB_URL";

/// Environment variable carrying a comma-separated interval override,
/// e.g. `1,2,4,7,15`.
pub const ENV_REVIEW_INTERVALS: &str = "HOT100_REVIEW_INTERVALS";

const DEFAULT_DATABASE_URL: &str = "sqlite:hot100.db?mode=rwc";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub intervals: IntervalPolicy,
}

impl Config {
    /// Reads configuration from the environment, falling back to the
    /// bundled defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Policy` if the interval override is present
    /// but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(ENV_DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let intervals = match env::var(ENV_REVIEW_INTERVALS) {
            Ok(raw) => IntervalPolicy::parse(&raw)?,
            Err(_) => IntervalPolicy::default(),
        };

        Ok(Self {
            database_url,
            intervals,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            intervals: IntervalPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hot100_core::policy::DEFAULT_REVIEW_INTERVALS;

    #[test]
    fn default_config_uses_bundled_intervals() {
        let config = Config::default();
        assert_eq!(config.intervals.intervals(), DEFAULT_REVIEW_INTERVALS);
        assert!(config.database_url.starts_with("sqlite:"));
    }
}
