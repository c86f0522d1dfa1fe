//! Error types for script execution.

use std::time::Duration;

use thiserror::Error;

/// Errors reported while running a script against the automation runtime.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The runtime reported an execution error.
    #[error("{message} ({code})")]
    Failed {
        /// Error number reported by the runtime.
        code: i32,
        /// Error text reported by the runtime.
        message: String,
    },

    /// The script did not finish before the deadline.
    #[error("Script timed out after {0:?}")]
    Timeout(Duration),

    /// The runner executable could not be started or awaited.
    #[error("Failed to run {path}: {source}")]
    Launch {
        /// Executable that was invoked.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ScriptError {
    /// Error number the runtime uses when the calling process is not allowed
    /// to send Apple events to the target application.
    pub const NOT_AUTHORIZED: i32 = -1743;

    /// Error number used when a failure report carries no number.
    pub const UNKNOWN: i32 = -1;

    /// Returns the runtime error number, if this is an execution error.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => Some(*code),
            Self::Timeout(_) | Self::Launch { .. } => None,
        }
    }

    /// Returns the human-readable message without the error number.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Failed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Parses the diagnostic `osascript` writes to stderr on failure.
    ///
    /// The usual shape is `<span>: execution error: <message> (<number>)`.
    /// Anything that does not end in a parenthesized number keeps its full
    /// trimmed text as the message with [`Self::UNKNOWN`] as the code.
    #[must_use]
    pub fn from_stderr(stderr: &str) -> Self {
        let text = stderr.trim();
        let text = text
            .find("execution error:")
            .map_or(text, |idx| text[idx + "execution error:".len()..].trim());

        if let Some(body) = text.strip_suffix(')')
            && let Some(open) = body.rfind('(')
            && let Ok(code) = body[open + 1..].trim().parse::<i32>()
        {
            return Self::Failed {
                code,
                message: body[..open].trim().to_string(),
            };
        }

        Self::Failed {
            code: Self::UNKNOWN,
            message: text.to_string(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, ScriptError>;
