use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for git-log-json operations
///
/// Every variant here is fatal: the run stops and no document is written.
/// Recoverable problems (bad tag names, unparsable log lines) are reported
/// as [`crate::diagnostic::Diagnostic`] values instead.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Required executable '{0}' was not found")]
    ExternalToolMissing(String),

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Unable to list tags: {0}")]
    TagListUnavailable(String),

    #[error("Log fetch failed for {window}: {reason}")]
    LogFetchFailed { window: String, reason: String },

    #[error("Command '{command}' timed out after {seconds}s")]
    CommandTimedOut { command: String, seconds: u64 },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-log-json
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a tag listing error with context
    pub fn tag_list(msg: impl Into<String>) -> Self {
        ChangelogError::TagListUnavailable(msg.into())
    }

    /// Create a log fetch error for the named window
    pub fn log_fetch(window: impl Into<String>, reason: impl Into<String>) -> Self {
        ChangelogError::LogFetchFailed {
            window: window.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was raised before any window was processed
    pub fn is_prerequisite(&self) -> bool {
        matches!(
            self,
            ChangelogError::ExternalToolMissing(_) | ChangelogError::NotARepository(_)
        )
    }
}
