//! # mailbridge-script
//!
//! Plumbing for talking to Apple Mail through its AppleScript dictionary.
//!
//! ## Features
//!
//! - **Query builder**: Generates bounded AppleScript programs for every
//!   read-only operation, with escaping for embedded text literals
//! - **Delimiter codec**: Encodes and decodes the flat, control-character
//!   separated text the scripts return
//! - **Executor capability**: A single synchronous [`ScriptExecutor`] trait so
//!   callers can swap the real `osascript` runner for a canned fake
//! - **osascript runner**: Runs scripts as a child process with a wall-clock
//!   timeout and turns `execution error` reports into structured failures
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailbridge_script::{OsascriptRunner, Query, RunnerConfig, ScriptExecutor, codec};
//!
//! let runner = OsascriptRunner::new(RunnerConfig::from_env())?;
//! let output = runner.execute(&Query::Accounts.to_script())?;
//! for record in codec::split_records(&output) {
//!     println!("{:?}", record.fields());
//! }
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Query ── to_script() ──→ Script ── execute() ──→ flat text ── codec ──→ records
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod codec;
mod error;
pub mod executor;
pub mod query;

pub use codec::Record;
pub use error::{Result, ScriptError};
pub use executor::{OsascriptRunner, RunnerConfig, ScriptExecutor};
pub use query::{Query, Script, escape};
