//! `osascript` child-process runner.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::ScriptExecutor;
use super::config::RunnerConfig;
use crate::error::{Result, ScriptError};
use crate::query::Script;

/// Runs scripts through `osascript -e`, one child process at a time.
///
/// Each call blocks the calling thread on a private current-thread runtime
/// until the child exits or the configured timeout passes. A timed-out child
/// is killed when its handle is dropped.
#[derive(Debug)]
pub struct OsascriptRunner {
    config: RunnerConfig,
    runtime: tokio::runtime::Runtime,
}

impl OsascriptRunner {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal runtime cannot be created.
    pub fn new(config: RunnerConfig) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { config, runtime })
    }

    async fn run(&self, script: &Script) -> Result<String> {
        let path = self.config.executable.display().to_string();
        debug!(query = script.name(), executable = %path, "running script");

        let child = Command::new(&self.config.executable)
            .arg("-e")
            .arg(script.source())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScriptError::Launch {
                path: path.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.config.timeout, child.wait_with_output()).await
        {
            Ok(result) => result.map_err(|source| ScriptError::Launch { path, source })?,
            Err(_) => {
                warn!(query = script.name(), timeout = ?self.config.timeout, "script timed out");
                return Err(ScriptError::Timeout(self.config.timeout));
            }
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            debug!(query = script.name(), bytes = stdout.len(), "script finished");
            Ok(stdout)
        } else {
            let err = ScriptError::from_stderr(&String::from_utf8_lossy(&output.stderr));
            debug!(query = script.name(), status = ?output.status, error = %err, "script failed");
            Err(err)
        }
    }
}

impl ScriptExecutor for OsascriptRunner {
    fn execute(&self, script: &Script) -> Result<String> {
        self.runtime.block_on(self.run(script))
    }

    fn describe(&self) -> String {
        format!(
            "{} (timeout {}s)",
            self.config.executable.display(),
            self.config.timeout.as_secs()
        )
    }
}
