//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;

/// Default snapshot file
pub const DEFAULT_DATA_FILE: &str = "tourney.json";
/// Default backup directory
pub const DEFAULT_BACKUP_DIR: &str = "backups";
/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Registry snapshot file
    pub data_file: PathBuf,
    /// Directory receiving timestamped backups
    pub backup_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_file_override` - Optional snapshot path (from CLI args)
    /// * `backup_dir_override` - Optional backup directory (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but unusable
    pub fn from_env(
        data_file_override: Option<PathBuf>,
        backup_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_file = data_file_override
            .or_else(|| std::env::var("TOURNEY_DATA_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let backup_dir = backup_dir_override
            .or_else(|| std::env::var("TOURNEY_BACKUP_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR));

        let log_filter = parse_env_or("TOURNEY_LOG", DEFAULT_LOG_FILTER.to_string());

        let config = CliConfig {
            data_file,
            backup_dir,
            log_filter,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOURNEY_DATA_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.data_file.is_dir() {
            return Err(ConfigError::Invalid {
                var: "TOURNEY_DATA_FILE".to_string(),
                reason: format!("{} is a directory", self.data_file.display()),
            });
        }

        if self.backup_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOURNEY_BACKUP_DIR".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOURNEY_LOG".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
