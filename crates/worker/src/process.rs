//! External command invocation.
//!
//! Pipelines shell out to the processing tool and the archiver. [`run`]
//! spawns a command with a discrete argument vector (never through a
//! shell), waits for it to exit, and returns the captured streams. A
//! non-zero exit code is data, not an error: only a command that cannot
//! be spawned at all fails here.

use std::ffi::OsStr;

/// Outcome of one external command invocation.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Exit code of the process; `None` if it was killed by a signal.
    pub exit_code: Option<i32>,
    /// Everything the command wrote to standard output.
    pub stdout: Vec<u8>,
    /// Everything the command wrote to standard error.
    pub stderr: Vec<u8>,
}

impl ExecutionResult {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Standard error as trimmed UTF-8, lossy where needed. Handy for
    /// error messages.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// The command could not be started at all (binary not found,
/// permission denied).
#[derive(Debug, thiserror::Error)]
#[error("failed to spawn '{command}': {source}")]
pub struct SpawnError {
    pub command: String,
    #[source]
    pub source: std::io::Error,
}

/// Spawn `command` with `args` and wait for it to exit, capturing both
/// output streams fully.
///
/// The captured streams and the exit code are echoed to the worker's own
/// log for observability; callers decide what a non-zero exit means.
pub async fn run<S: AsRef<OsStr>>(
    command: &str,
    args: &[S],
) -> Result<ExecutionResult, SpawnError> {
    let output = tokio::process::Command::new(command)
        .args(args)
        .output()
        .await
        .map_err(|source| SpawnError {
            command: command.to_string(),
            source,
        })?;

    let result = ExecutionResult {
        exit_code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    };

    if !result.stdout.is_empty() {
        tracing::debug!(
            command,
            stdout = %String::from_utf8_lossy(&result.stdout).trim_end(),
            "Command stdout",
        );
    }
    if !result.stderr.is_empty() {
        tracing::debug!(
            command,
            stderr = %String::from_utf8_lossy(&result.stderr).trim_end(),
            "Command stderr",
        );
    }
    tracing::debug!(command, exit_code = ?result.exit_code, "Command exited");

    Ok(result)
}
