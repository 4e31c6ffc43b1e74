use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

const DEFAULT_POLL_SECS: u64 = 30;
const APP_DIR: &str = "project-ledger";

fn default_poll_secs() -> u64 {
    DEFAULT_POLL_SECS
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Directory holding the work-session store
    #[serde(default)]
    pub session_store_dir: Option<PathBuf>,
    /// Seconds between work-session polls
    #[serde(default = "default_poll_secs")]
    pub session_poll_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from explicit `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Directory of the session store, defaulting to the platform data dir
    pub fn session_store_dir(&self) -> PathBuf {
        match &self.session_store_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Session poll period, never shorter than one second
    pub fn session_poll_interval(&self) -> Duration {
        Duration::from_secs(self.session_poll_secs.max(1))
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let config = Config::from_vars(vars(&[("DATABASE_URL", "postgres://localhost/ledger")])).unwrap();
        assert_eq!(config.database_url(), "postgres://localhost/ledger");
        assert_eq!(config.session_poll_interval(), Duration::from_secs(30));
        assert!(config.session_store_dir.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/ledger"),
            ("SESSION_STORE_DIR", "/tmp/sessions"),
            ("SESSION_POLL_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.session_store_dir(), PathBuf::from("/tmp/sessions"));
        assert_eq!(config.session_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn database_url_is_required() {
        assert!(Config::from_vars(vars(&[("SESSION_POLL_SECS", "10")])).is_err());
    }
}
