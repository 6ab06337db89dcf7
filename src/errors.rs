// Error types and user-friendly error messages
//
// Domain validation failures are typed so the HTTP layer can map them to
// status codes. The formatting helpers turn plumbing errors into messages
// that tell the user what to do next.

use std::fmt;
use thiserror::Error;

/// Rejected keyword-table extension
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeywordError {
    #[error("crisis keyword phrase must not be empty")]
    EmptyKeyword,
}

/// Rejected submission
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("message is too short ({actual} characters, minimum {min})")]
    TooShort { min: usize, actual: usize },

    #[error("message is too long ({actual} characters, maximum {max})")]
    TooLong { max: usize, actual: usize },

    #[error("mood must be between 1 and 5 (got {0})")]
    InvalidMood(u8),

    #[error("unknown tag: {0}")]
    UnknownTag(String),
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat {}\x1b[0m\n\n\
        2. Move the file aside to fall back to defaults:\n\
           \x1b[36mmv {} {}.backup\x1b[0m\n\n\
        3. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unclosed brackets []\n\
           • Numbers given as strings (retention_days = \"30\")",
        path, error, path, path, path
    )
}

/// Format a file not found error with helpful suggestions
pub fn file_not_found_error(path: &str, description: &str) -> String {
    format!(
        "{} not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • File has been deleted\n\
        • Wrong path specified in config.toml\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check if file exists:\n\
           \x1b[36mls -la {}\x1b[0m\n\n\
        2. Remove the setting from config.toml to use the built-in keywords only",
        description, path, path
    )
}

/// Format a permission denied error with helpful suggestions
pub fn permission_denied_error(path: &str, operation: &str) -> String {
    format!(
        "Permission denied: cannot {} {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Insufficient file permissions\n\
        • Data directory owned by another user\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check file permissions:\n\
           \x1b[36mls -la {}\x1b[0m\n\n\
        2. Point storage.data_dir at a writable directory in config.toml",
        operation, path, path
    )
}

/// Wrap a generic error with a suggestion
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", error, suggestion)
}
