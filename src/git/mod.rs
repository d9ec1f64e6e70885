//! History source abstraction layer
//!
//! The changelog core never talks to git directly. It asks a
//! [`HistorySource`] for the raw tag listing and for the raw log text of
//! each window, which keeps the windowing and parsing logic testable without
//! a repository.
//!
//! - [`cli::GitCli`]: runs the `git` executable, one bounded call at a time
//! - [`mock::MockHistory`]: canned output for tests
//!
//! ```rust,no_run
//! # use git_log_json::git::{GitCli, HistorySource};
//! # use std::time::Duration;
//! # fn example() -> git_log_json::Result<()> {
//! let git = GitCli::open(".", Duration::from_secs(30))?;
//! let tags = git.list_tags()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod command;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockHistory;

use crate::domain::Window;
use crate::error::Result;
use crate::parser::LogFormat;

/// Raw text access to a repository's tags and history
///
/// Implementations return the command output untouched; validation and
/// parsing happen in the domain layer.
///
/// ## Errors
///
/// - `list_tags` fails with `TagListUnavailable` when the listing cannot be
///   produced at all.
/// - `fetch_log` fails with `LogFetchFailed` (or `CommandTimedOut`) when the
///   log for a window cannot be produced.
pub trait HistorySource {
    /// Tag labels, one per line, in no particular order
    fn list_tags(&self) -> Result<String>;

    /// Delimiter-joined commit lines for `window`, rendered with `format`
    fn fetch_log(&self, window: &Window, format: &LogFormat) -> Result<String>;
}
