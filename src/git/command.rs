//! Blocking external command execution with a deadline

use crate::error::{ChangelogError, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished command
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or -1 when the process was killed by a signal
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Run `program` with `args` in `dir`, killing it once `timeout` elapses.
///
/// Spawn failures surface as `Io`; an expired deadline as `CommandTimedOut`.
pub fn run_with_timeout(
    program: &str,
    args: &[String],
    dir: &Path,
    timeout: Duration,
) -> Result<CommandOutput> {
    debug!(program, ?args, dir = %dir.display(), "spawning command");

    let mut child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match wait_until(&mut child, Instant::now() + timeout)? {
        Some(status) => status,
        None => {
            // Already exited between the last poll and kill is fine.
            let _ = child.kill();
            let _ = child.wait();
            return Err(ChangelogError::CommandTimedOut {
                command: format!("{} {}", program, args.join(" ")),
                seconds: timeout.as_secs(),
            });
        }
    };

    Ok(CommandOutput {
        status,
        stdout: join(stdout)?,
        stderr: join(stderr)?,
    })
}

fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Read a pipe to the end on its own thread so a chatty child never blocks
/// on a full pipe while we poll for its exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    handle
        .join()
        .map_err(|_| std::io::Error::other("output reader thread panicked"))?
        .map_err(ChangelogError::from)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_captures_stdout_and_status() {
        let out = run_with_timeout("sh", &sh("printf hello"), Path::new("."), Duration::from_secs(5))
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, b"hello");
    }

    #[test]
    fn test_reports_failure_status_and_stderr() {
        let out = run_with_timeout(
            "sh",
            &sh("echo broken >&2; exit 3"),
            Path::new("."),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!out.success());
        assert_eq!(out.code(), 3);
        assert_eq!(out.stderr_lossy(), "broken");
    }

    #[test]
    fn test_kills_on_timeout() {
        let started = Instant::now();
        let err = run_with_timeout("sh", &sh("sleep 5"), Path::new("."), Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, ChangelogError::CommandTimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let err = run_with_timeout(
            "definitely-not-a-real-binary-xyz",
            &[],
            Path::new("."),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ChangelogError::Io(_)));
    }
}
