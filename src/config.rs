//! Client configuration.
//!
//! Configuration is resolved in layers: built-in defaults, then an optional
//! YAML file, then `MINCA_*` environment variables.  Front-ends apply their
//! command-line flags last.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "MINCA_BASE_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "MINCA_TIMEOUT_SECS";

/// Environment variable holding the local storage directory.
pub const DATA_DIR_ENV: &str = "MINCA_DATA_DIR";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Directory for persisted client state; `None` picks the platform default.
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            data_dir: None,
        }
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self> {
        Self::new().with_env_overrides()
    }

    /// Reads a YAML configuration file; missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolves defaults, an optional YAML file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::new(),
        };
        config.with_env_overrides()
    }

    /// Applies `MINCA_*` environment variables on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            self = self.with_base_url(base_url);
        }
        if let Ok(timeout) = env::var(TIMEOUT_ENV) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                Error::validation(
                    format!("{TIMEOUT_ENV} must be a whole number of seconds, got {timeout:?}"),
                    Some(TIMEOUT_ENV.to_string()),
                )
            })?;
            self.timeout_secs = secs;
        }
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }

    /// Sets the base URL; trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the storage directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and validates the base URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::validation(
                format!("unsupported URL scheme {scheme:?}"),
                Some("base_url".to_string()),
            )),
        }
    }

    /// Storage directory, falling back to `<platform data dir>/minca`.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs_next::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("minca"),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn builder_pattern() {
        let config = ClientConfig::new()
            .with_base_url("https://api.minca.example/v1///")
            .with_timeout(Duration::from_secs(5))
            .with_data_dir("/tmp/minca-test");
        assert_eq!(config.base_url, "https://api.minca.example/v1");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/minca-test"));
    }

    #[test]
    fn base_url_validation() {
        assert!(ClientConfig::new().base_url().is_ok());
        let config = ClientConfig::new().with_base_url("ftp://example.com");
        assert!(config.base_url().unwrap_err().is_validation());
        let config = ClientConfig::new().with_base_url("not a url");
        assert!(matches!(config.base_url(), Err(Error::Url { .. })));
    }

    #[test]
    fn yaml_keeps_defaults_for_missing_keys() {
        let config: ClientConfig = serde_yaml::from_str("base_url: https://example.com\n").unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn yaml_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("minca-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "timeout_secs: 7\ndata_dir: /var/lib/minca\n").unwrap();
        let config = ClientConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/minca"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
