//! `mailbridge` - read-only JSON bridge to Apple Mail.
//!
//! Runs one operation per invocation, prints one JSON envelope on stdout
//! and exits 0 for `ok` or 1 for `error`. Logs go to stderr.

mod cli;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mailbridge_core::MailService;
use mailbridge_script::{OsascriptRunner, RunnerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, dispatch};

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging; stdout is reserved for the envelope
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mailbridge=info,mailbridge_core=info,mailbridge_script=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = RunnerConfig::builder()
        .executable_override(cli.osascript)
        .timeout(Duration::from_secs(cli.timeout))
        .build();
    info!(
        executable = %config.executable.display(),
        timeout_secs = cli.timeout,
        "Starting MailBridge"
    );

    let runner = OsascriptRunner::new(config).context("Failed to start script runtime")?;
    let service = MailService::new(runner);

    let outcome = dispatch(&service, &cli.command, cli.pretty)?;
    println!("{}", outcome.json);

    Ok(if outcome.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
