//! Script execution.
//!
//! The automation runtime is reached through one synchronous capability,
//! [`ScriptExecutor`]. The production implementation is [`OsascriptRunner`];
//! tests substitute a fake that returns canned delimited text.

mod config;
mod osascript;

pub use config::{
    DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT, EXECUTABLE_ENV, RunnerConfig, RunnerConfigBuilder,
};
pub use osascript::OsascriptRunner;

use crate::error::Result;
use crate::query::Script;

/// Runs one script and returns its raw text result.
///
/// Implementations must not run scripts concurrently against the same
/// application instance and must not retry on failure.
pub trait ScriptExecutor {
    /// Executes `script`, returning stdout on success.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ScriptError`] when the runtime reports a failure,
    /// the deadline passes, or the runner cannot be started.
    fn execute(&self, script: &Script) -> Result<String>;

    /// One-line description of where scripts are sent, for diagnostics.
    fn describe(&self) -> String {
        String::from("custom executor")
    }
}

impl<T: ScriptExecutor + ?Sized> ScriptExecutor for &T {
    fn execute(&self, script: &Script) -> Result<String> {
        (**self).execute(script)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ScriptExecutor + ?Sized> ScriptExecutor for Box<T> {
    fn execute(&self, script: &Script) -> Result<String> {
        (**self).execute(script)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
