// Configuration structs

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default retention window for stored submissions
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const DEFAULT_MIN_LENGTH: usize = 10;
pub const DEFAULT_MAX_LENGTH: usize = 2000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8787";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Force debug-level logging
    pub debug_logging: bool,

    pub storage: StorageConfig,

    pub submission: SubmissionLimits,

    pub crisis: CrisisConfig,

    pub server: ServerConfig,

    /// Root of all app files (config.toml, daemon.log, default data dir)
    #[serde(skip)]
    pub home: PathBuf,
}

impl Config {
    /// Defaults rooted at `home`
    pub fn new(home: PathBuf) -> Self {
        Self {
            debug_logging: false,
            storage: StorageConfig::default(),
            submission: SubmissionLimits::default(),
            crisis: CrisisConfig::default(),
            server: ServerConfig::default(),
            home,
        }
    }

    /// Directory holding submissions.json
    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => self.resolve(dir),
            None => self.home.join("data"),
        }
    }

    /// Custom keyword file, if configured
    pub fn keywords_path(&self) -> Option<PathBuf> {
        self.crisis.keywords_path.as_deref().map(|p| self.resolve(p))
    }

    pub fn log_path(&self) -> PathBuf {
        self.home.join("daemon.log")
    }

    // Relative paths in config.toml are relative to the app home
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home.join(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from(".secret-stress"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub retention_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

/// Accepted submission length range (characters, after trimming)
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionLimits {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrisisConfig {
    /// JSON array of extra keywords appended to the built-in table
    pub keywords_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}
