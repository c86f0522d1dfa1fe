//! Command surface.
//!
//! Every subcommand maps to one service operation, and every result is
//! rendered as exactly one JSON envelope.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailbridge_core::{BridgeEnvelope, DEFAULT_PAGE_SIZE, MailService};
use mailbridge_script::ScriptExecutor;
use mailbridge_script::executor::{DEFAULT_TIMEOUT, EXECUTABLE_ENV};
use serde::Serialize;

/// Read-only JSON bridge to Apple Mail.
#[derive(Debug, Parser)]
#[command(name = "mailbridge", version)]
#[command(about = "Read-only JSON bridge to Apple Mail", long_about = None)]
pub struct Cli {
    /// Seconds to wait for each script before giving up (at least 1).
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Pretty-print the JSON envelope.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// osascript executable to run scripts with.
    #[arg(long, global = true, env = EXECUTABLE_ENV)]
    pub osascript: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Bridge operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check that Mail can be automated
    Diagnostics,

    /// List configured accounts
    ListAccounts,

    /// List mailboxes as a two-level tree
    ListMailboxes {
        #[arg(long)]
        account: Option<String>,
    },

    /// List one page of a mailbox, newest first
    ListMessages {
        #[arg(long)]
        mailbox: String,

        #[arg(long)]
        account: Option<String>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,

        /// Messages to skip from the newest end
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Fetch one message with body and attachments
    GetMessage {
        /// Store-assigned message id
        #[arg(long)]
        id: u64,

        #[arg(long)]
        mailbox: String,

        #[arg(long)]
        account: Option<String>,
    },

    /// List unread messages (each account's INBOX unless a mailbox is given)
    ListUnread {
        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        mailbox: Option<String>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },

    /// Find messages whose subject or sender contains the query
    Search {
        #[arg(long)]
        query: String,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        mailbox: Option<String>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
}

/// Rendered envelope and whether it reports success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// JSON envelope text.
    pub json: String,
    /// True when the envelope's status is `ok`.
    pub ok: bool,
}

fn render<T: Serialize>(envelope: &BridgeEnvelope<T>, pretty: bool) -> Result<Outcome> {
    let json = envelope
        .to_json(pretty)
        .context("Failed to serialize response")?;
    Ok(Outcome {
        json,
        ok: envelope.is_ok(),
    })
}

fn respond<T: Serialize>(result: mailbridge_core::Result<T>, pretty: bool) -> Result<Outcome> {
    render(&BridgeEnvelope::<T>::from(result), pretty)
}

/// Runs one command against the service.
///
/// # Errors
///
/// Fails only if the envelope cannot be serialized. Operation failures are
/// reported inside the envelope.
pub fn dispatch<E: ScriptExecutor>(
    service: &MailService<E>,
    command: &Command,
    pretty: bool,
) -> Result<Outcome> {
    match command {
        Command::Diagnostics => render(&BridgeEnvelope::ok(service.diagnostics()), pretty),
        Command::ListAccounts => respond(service.list_accounts(), pretty),
        Command::ListMailboxes { account } => {
            respond(service.list_mailboxes(account.as_deref()), pretty)
        }
        Command::ListMessages {
            mailbox,
            account,
            limit,
            offset,
        } => respond(
            service.list_messages(mailbox, account.as_deref(), *limit, *offset),
            pretty,
        ),
        Command::GetMessage {
            id,
            mailbox,
            account,
        } => respond(service.get_message(*id, mailbox, account.as_deref()), pretty),
        Command::ListUnread {
            account,
            mailbox,
            limit,
        } => respond(
            service.list_unread(account.as_deref(), mailbox.as_deref(), *limit),
            pretty,
        ),
        Command::Search {
            query,
            account,
            mailbox,
            limit,
        } => respond(
            service.search(query, account.as_deref(), mailbox.as_deref(), *limit),
            pretty,
        ),
    }
}
