use crate::domain::Window;
use crate::error::{ChangelogError, Result};
use crate::git::command::{run_with_timeout, CommandOutput};
use crate::git::HistorySource;
use crate::parser::LogFormat;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const GIT: &str = "git";

/// History source backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    timeout: Duration,
    date_format: Option<String>,
}

impl GitCli {
    /// Check that `git` runs and that `path` is inside a repository.
    ///
    /// # Returns
    /// * `Ok(GitCli)` - rooted at the repository's work tree
    /// * `Err(ExternalToolMissing)` - if `git` cannot be executed
    /// * `Err(NotARepository)` - if no repository contains `path`
    pub fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();

        match run_with_timeout(GIT, &["--version".to_string()], Path::new("."), timeout) {
            Ok(out) if out.success() => {
                debug!(version = %String::from_utf8_lossy(&out.stdout).trim(), "found git");
            }
            Ok(_) => return Err(ChangelogError::ExternalToolMissing(GIT.to_string())),
            Err(ChangelogError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(ChangelogError::ExternalToolMissing(GIT.to_string()))
            }
            Err(e) => return Err(e),
        }

        let repo = git2::Repository::discover(path)
            .map_err(|_| ChangelogError::NotARepository(path.to_path_buf()))?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(workdir = %workdir.display(), "discovered repository");

        Ok(GitCli {
            workdir,
            timeout,
            date_format: None,
        })
    }

    /// Pass `--date=<format>` to every log call (e.g. "iso", "short")
    pub fn with_date_format(mut self, date_format: Option<String>) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn git(&self, args: &[String]) -> Result<CommandOutput> {
        run_with_timeout(GIT, args, &self.workdir, self.timeout)
    }

    fn log_args(&self, window: &Window, format: &LogFormat) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--encoding=UTF-8".to_string(),
            format!("--pretty=format:{}", format.pretty_spec()),
            "--no-show-signature".to_string(),
        ];
        if let Some(date_format) = &self.date_format {
            args.push(format!("--date={}", date_format));
        }
        args.push(window.revision_range());
        args.push("--".to_string());
        args
    }
}

impl HistorySource for GitCli {
    fn list_tags(&self) -> Result<String> {
        let out = self
            .git(&["tag".to_string(), "--list".to_string()])
            .map_err(|e| match e {
                ChangelogError::Io(e) => ChangelogError::tag_list(e.to_string()),
                other => other,
            })?;

        if !out.success() {
            return Err(ChangelogError::tag_list(format!(
                "git tag exited with status {}: {}",
                out.code(),
                out.stderr_lossy()
            )));
        }

        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn fetch_log(&self, window: &Window, format: &LogFormat) -> Result<String> {
        let out = self
            .git(&self.log_args(window, format))
            .map_err(|e| match e {
                ChangelogError::Io(e) => ChangelogError::log_fetch(window.to_string(), e.to_string()),
                other => other,
            })?;

        if !out.success() {
            return Err(ChangelogError::log_fetch(
                window.to_string(),
                format!("git log exited with status {}: {}", out.code(), out.stderr_lossy()),
            ));
        }

        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
