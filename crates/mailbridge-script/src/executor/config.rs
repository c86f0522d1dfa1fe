//! Runner configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the `osascript` location.
pub const EXECUTABLE_ENV: &str = "MAILBRIDGE_OSASCRIPT";

/// Default `osascript` location on macOS.
pub const DEFAULT_EXECUTABLE: &str = "/usr/bin/osascript";

/// Default wall-clock limit for one script.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `osascript` runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Executable to invoke.
    pub executable: PathBuf,
    /// Wall-clock limit per script.
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with defaults, honoring [`EXECUTABLE_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::builder()
            .executable_override(std::env::var_os(EXECUTABLE_ENV).map(PathBuf::from))
            .build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::new()
    }
}

/// Builder for runner configuration.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfigBuilder {
    executable: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl RunnerConfigBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the executable path.
    #[must_use]
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Sets the executable path if one is given; empty paths are ignored.
    #[must_use]
    pub fn executable_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            self.executable = Some(path);
        }
        self
    }

    /// Sets the per-script timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> RunnerConfig {
        RunnerConfig {
            executable: self
                .executable
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXECUTABLE)),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}
