// Configuration loader
// Loads settings from $SECRET_STRESS_HOME/config.toml (default ~/.secret-stress)

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::config_parse_error;

/// Environment variable overriding the app home directory
pub const HOME_ENV: &str = "SECRET_STRESS_HOME";

/// Resolve the app home directory
pub fn app_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".secret-stress"))
}

/// Load configuration from the app home, falling back to defaults
pub fn load_config() -> Result<Config> {
    let home = app_home()?;
    load_config_from(&home)
}

/// Load `<home>/config.toml`; a missing file yields defaults rooted at `home`
pub fn load_config_from(home: &Path) -> Result<Config> {
    let config_path = home.join("config.toml");

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        return Ok(Config::new(home.to_path_buf()));
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let mut config: Config = toml::from_str(&contents).map_err(|e| {
        anyhow!(config_parse_error(
            &config_path.display().to_string(),
            &e.to_string()
        ))
    })?;
    config.home = home.to_path_buf();

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let limits = config.submission;
    if limits.min_length > limits.max_length {
        bail!(
            "submission.min_length ({}) is greater than submission.max_length ({})",
            limits.min_length,
            limits.max_length
        );
    }
    if config.storage.retention_days == 0 {
        bail!("storage.retention_days must be at least 1");
    }
    Ok(())
}
