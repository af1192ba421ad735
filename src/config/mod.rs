use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Configuration for the application
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the portfolio backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where log output goes; the terminal is owned by the UI
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_file() -> PathBuf {
    PathBuf::from("portfolio_manager.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = Self::from_vars(std::env::vars())?;

        Ok(config)
    }

    /// Build the configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    /// Replace the backend URL, e.g. from a command line flag
    pub fn with_backend_url(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = url;
        }
        self
    }

    /// Base URL with any trailing slash removed, ready for path joins
    pub fn backend_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize environment variables and load configuration
pub fn init(backend_url: Option<String>) -> Result<Config> {
    let config = Config::load()?.with_backend_url(backend_url);

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
    fn defaults_to_local_backend() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.backend_url(), "http://localhost:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides_from_environment() {
        let config = Config::from_vars(vars(&[
            ("BACKEND_URL", "https://api.example.com/"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("LOG_FILE", "/tmp/folio.log"),
        ]))
        .unwrap();

        assert_eq!(config.backend_url(), "https://api.example.com");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.log_file, PathBuf::from("/tmp/folio.log"));
    }

    #[test]
    fn command_line_url_wins() {
        let config = Config::default().with_backend_url(Some("http://10.0.0.2:9000".to_string()));
        assert_eq!(config.backend_url(), "http://10.0.0.2:9000");

        let config = Config::default().with_backend_url(None);
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL);
    }
}
