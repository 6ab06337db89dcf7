// Expiring submission store
//
// Submissions live in a single JSON array file. Writers take an exclusive
// lock on a sibling lock file so the CLI and the daemon can share a data
// directory.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::stats::StressStats;
use super::submission::{NewSubmission, Submission};
use crate::config::SubmissionLimits;
use crate::errors::permission_denied_error;

const SUBMISSIONS_FILE: &str = "submissions.json";
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// True when `timestamp` is more than `retention_days` (rounded up) from `now`
pub fn is_expired(timestamp: DateTime<Utc>, now: DateTime<Utc>, retention_days: u32) -> bool {
    let diff_ms = now.signed_duration_since(timestamp).num_milliseconds().abs();
    let diff_days = (diff_ms + MS_PER_DAY - 1) / MS_PER_DAY;
    diff_days > i64::from(retention_days)
}

pub struct SubmissionStore {
    file_path: PathBuf,
    lock_path: PathBuf,
    retention_days: u32,
    limits: SubmissionLimits,
}

impl SubmissionStore {
    /// Open (creating if needed) a store in `dir`
    pub fn open(dir: impl AsRef<Path>, retention_days: u32, limits: SubmissionLimits) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                anyhow!(permission_denied_error(&dir.display().to_string(), "create"))
            } else {
                anyhow!(e).context(format!("Failed to create data directory: {}", dir.display()))
            }
        })?;

        let file_path = dir.join(SUBMISSIONS_FILE);
        let lock_path = file_path.with_extension("lock");

        Ok(Self {
            file_path,
            lock_path,
            retention_days,
            limits,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn limits(&self) -> SubmissionLimits {
        self.limits
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Validate and persist a submission, purging expired entries first
    pub fn save(&self, submission: NewSubmission) -> Result<Submission> {
        self.save_at(submission, Utc::now())
    }

    /// `save` with an explicit clock
    pub fn save_at(&self, submission: NewSubmission, now: DateTime<Utc>) -> Result<Submission> {
        let submission = submission.validate(self.limits)?;

        self.with_lock(|| {
            let existing = self.read_all()?;
            let before = existing.len();
            let mut submissions: Vec<Submission> = existing
                .into_iter()
                .filter(|s| !is_expired(s.timestamp, now, self.retention_days))
                .collect();
            let purged = before - submissions.len();

            let stored = Submission {
                id: Uuid::new_v4().to_string(),
                content: submission.content,
                mood: submission.mood,
                timestamp: now,
                tags: submission.tags,
                crisis_assessment: submission.crisis_assessment,
            };
            submissions.push(stored.clone());
            self.write_all(&submissions)?;

            tracing::info!(
                id = %stored.id,
                fingerprint = %fingerprint(&stored.content),
                mood = stored.mood.value(),
                purged,
                "Saved submission"
            );
            Ok(stored)
        })
    }

    /// Non-expired submissions, newest first
    pub fn list(&self) -> Result<Vec<Submission>> {
        let now = Utc::now();
        let mut submissions = self.with_lock(|| {
            let all = self.read_all()?;
            let before = all.len();
            let valid: Vec<Submission> = all
                .into_iter()
                .filter(|s| !is_expired(s.timestamp, now, self.retention_days))
                .collect();

            if valid.len() != before {
                self.write_all(&valid)?;
                tracing::debug!(removed = before - valid.len(), "Dropped expired submissions");
            }
            Ok(valid)
        })?;

        submissions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(submissions)
    }

    pub fn get(&self, id: &str) -> Result<Option<Submission>> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    /// Remove one submission; false if no submission has that id
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.with_lock(|| {
            let submissions = self.read_all()?;
            let before = submissions.len();
            let remaining: Vec<Submission> =
                submissions.into_iter().filter(|s| s.id != id).collect();

            if remaining.len() == before {
                return Ok(false);
            }

            self.write_all(&remaining)?;
            tracing::info!(id, "Deleted submission");
            Ok(true)
        })
    }

    /// Remove everything past the retention window, returning the count removed
    pub fn delete_expired(&self) -> Result<usize> {
        self.delete_expired_at(Utc::now())
    }

    pub fn delete_expired_at(&self, now: DateTime<Utc>) -> Result<usize> {
        self.with_lock(|| {
            let submissions = self.read_all()?;
            let before = submissions.len();
            let valid: Vec<Submission> = submissions
                .into_iter()
                .filter(|s| !is_expired(s.timestamp, now, self.retention_days))
                .collect();

            let deleted = before - valid.len();
            if deleted > 0 {
                self.write_all(&valid)?;
                tracing::info!(deleted, "Purged expired submissions");
            }
            Ok(deleted)
        })
    }

    /// Emergency wipe: remove the submissions file entirely
    pub fn clear_all(&self) -> Result<()> {
        self.with_lock(|| {
            match fs::remove_file(&self.file_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(anyhow!(e)
                        .context(format!("Failed to remove {}", self.file_path.display())))
                }
            }
            tracing::warn!(path = %self.file_path.display(), "Cleared all submissions");
            Ok(())
        })
    }

    pub fn stats(&self) -> Result<StressStats> {
        Ok(StressStats::from_submissions(&self.list()?))
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.lock_path)
            .with_context(|| format!("Failed to open lock file: {}", self.lock_path.display()))?;

        // Blocks until any other writer releases the lock
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {}", self.lock_path.display()))?;

        let result = f();
        let _ = lock_file.unlock();
        result
    }

    fn read_all(&self) -> Result<Vec<Submission>> {
        let contents = match fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(anyhow!(e)
                    .context(format!("Failed to read {}", self.file_path.display())))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))
    }

    fn write_all(&self, submissions: &[Submission]) -> Result<()> {
        let json = serde_json::to_string_pretty(submissions)
            .context("Failed to serialize submissions")?;

        // Write to a temp file and rename so readers never see a partial file
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}

/// Short SHA-256 prefix used to correlate log lines without logging content
pub fn fingerprint(content: &str) -> String {
    use sha2::{Digest, Sha256};

    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_expired_rounds_up_partial_days() {
        let now = Utc::now();
        assert!(!is_expired(now, now, 30));
        assert!(!is_expired(now - Duration::days(30), now, 30));
        assert!(is_expired(now - Duration::days(30) - Duration::hours(1), now, 30));
        assert!(is_expired(now - Duration::days(31), now, 30));
    }

    #[test]
    fn test_is_expired_uses_absolute_difference() {
        let now = Utc::now();
        assert!(is_expired(now + Duration::days(45), now, 30));
    }

    #[test]
    fn test_fingerprint_is_stable_prefix() {
        let a = fingerprint("hello");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("hello"));
        assert_ne!(a, fingerprint("hello!"));
    }
}
