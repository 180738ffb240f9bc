//! Configuration management for feedsync.
//!
//! Configuration is read from `~/.config/feedsync/config.toml` (or a path
//! given on the command line). If the default file doesn't exist, one with
//! comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub fetcher: FetcherConfig,
    pub database: DatabaseConfig,
}

/// Polling loop settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Delay between the end of one pass and the start of the next (default: 5000)
    pub period_ms: u64,

    /// Upper bound on a single feed fetch in seconds (default: 30)
    pub fetch_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            period_ms: 5000,
            fetch_timeout_secs: 30,
        }
    }
}

impl SyncConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("feedsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` means `<data_dir>/feedsync/feedsync.db`
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the sync loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.period_ms == 0 {
            return Err(ConfigError::Invalid("sync.period_ms must be greater than zero".into()));
        }
        if self.sync.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "sync.fetch_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/feedsync/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedsync").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# feedsync configuration

[sync]
# Pause between two sync passes, in milliseconds. The pause starts after
# every source of the previous pass has been processed.
period_ms = 5000

# Give up on a single feed after this many seconds and move on
fetch_timeout_secs = 30

[fetcher]
# HTTP request timeout in seconds
timeout_secs = 10

[database]
# SQLite database file. Defaults to the platform data directory.
# path = "/var/lib/feedsync/feedsync.db"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.sync.period_ms, 5000);
        assert_eq!(config.sync.fetch_timeout_secs, 30);
        assert_eq!(config.fetcher.timeout_secs, 10);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[sync]
period_ms = 60000
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.sync.period_ms, 60_000);
        assert_eq!(config.sync.fetch_timeout(), Duration::from_secs(30));
        assert!(config.fetcher.user_agent.starts_with("feedsync/"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.sync.period_ms, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\npath = \"/tmp/news.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/news.db")));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sync]\nperiod_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_from_rejects_zero_fetch_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sync]\nfetch_timeout_secs = 0\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_rejects_zero_period() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sync]\nperiod_ms = 0\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load_from(&dir.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
