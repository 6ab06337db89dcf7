// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{app_home, load_config, load_config_from, HOME_ENV};
pub use settings::{
    Config, CrisisConfig, ServerConfig, StorageConfig, SubmissionLimits, DEFAULT_BIND_ADDRESS,
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_RETENTION_DAYS,
};
