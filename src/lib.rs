// Secret Stress - Anonymous student stress log with crisis detection
// Library exports

pub mod config;
pub mod crisis; // Keyword detection and severity resolution
pub mod errors;
pub mod metrics;
pub mod server; // HTTP daemon mode
pub mod storage; // Expiring submission log

use anyhow::{anyhow, Result};

use config::Config;
use crisis::CrisisDetector;
use storage::SubmissionStore;

/// Built-in detector plus any custom keywords named in the config
pub fn build_detector(config: &Config) -> Result<CrisisDetector> {
    let mut detector = CrisisDetector::new();

    if let Some(path) = config.keywords_path() {
        if !path.exists() {
            return Err(anyhow!(errors::file_not_found_error(
                &path.display().to_string(),
                "Custom crisis keywords file"
            )));
        }
        detector.extend_from_file(&path)?;
    }

    Ok(detector)
}

/// Submission store at the configured data directory
pub fn open_store(config: &Config) -> Result<SubmissionStore> {
    SubmissionStore::open(
        config.data_dir(),
        config.storage.retention_days,
        config.submission,
    )
}
