//! Mail service for read-only Apple Mail operations.
//!
//! Each method validates its parameters, builds one or two queries, runs
//! them through the executor and decodes the result. Nothing is cached
//! between calls.

use chrono::Utc;
use mailbridge_script::{Query, ScriptExecutor};
use tracing::{debug, info, warn};

use super::validation::{optional_text, require_id, require_limit, require_text};
use crate::decode::{decode_accounts, decode_count, decode_detail, decode_headers, decode_mailbox_rows};
use crate::error::{BridgeError, Result, Target};
use crate::model::{
    Account, Diagnostics, MailAccess, Mailbox, MessageDetail, MessageHeader, PaginatedMessages,
};
use crate::pagination::{effective_limit, paginate};
use crate::tree::build_tree;

/// Bridge version reported by diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read-only operations over one script executor.
#[derive(Debug)]
pub struct MailService<E> {
    executor: E,
}

impl<E: ScriptExecutor> MailService<E> {
    /// Creates a service that sends scripts to `executor`.
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    fn run(&self, query: &Query, target: &Target<'_>) -> Result<String> {
        let script = query.to_script();
        debug!(query = script.name(), "running script");
        self.executor.execute(&script).map_err(|err| {
            let classified = BridgeError::classify(&err, target);
            warn!(query = script.name(), error = %err, "script failed: {classified}");
            classified
        })
    }

    /// Probes the automation runtime.
    ///
    /// Never fails: denial and other failures are reported inside the
    /// returned record.
    pub fn diagnostics(&self) -> Diagnostics {
        info!("running diagnostics");
        let (mail_access, account_count, message) = match self.run(&Query::Probe, &Target::default()) {
            Ok(output) => (MailAccess::Granted, Some(decode_count(&output)), None),
            Err(err @ BridgeError::MailAccessDenied) => {
                (MailAccess::Denied, None, Some(err.to_string()))
            }
            Err(err) => (MailAccess::Error, None, Some(err.to_string())),
        };

        Diagnostics {
            version: VERSION.to_string(),
            executor: self.executor.describe(),
            mail_access,
            account_count,
            message,
            checked_at: Utc::now(),
        }
    }

    /// Lists every configured account.
    ///
    /// # Errors
    ///
    /// Returns a classified automation failure.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        info!("listing accounts");
        let output = self.run(&Query::Accounts, &Target::default())?;
        Ok(decode_accounts(&output))
    }

    /// Lists mailboxes as a two-level tree, optionally for one account.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AccountNotFound`] for an unknown account, or a
    /// classified automation failure.
    pub fn list_mailboxes(&self, account: Option<&str>) -> Result<Vec<Mailbox>> {
        let account = optional_text(account);
        info!(account = account.as_deref(), "listing mailboxes");

        let target = Target {
            account: account.as_deref(),
            ..Target::default()
        };
        let query = Query::Mailboxes {
            account: account.clone(),
        };
        let output = self.run(&query, &target)?;
        Ok(build_tree(decode_mailbox_rows(&output)))
    }

    /// Lists one newest-first page of a mailbox.
    ///
    /// Counts the mailbox first, then fetches only the page's index range.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidParameter`] for a blank mailbox or zero
    /// limit, a not-found case for an unknown account or mailbox, or a
    /// classified automation failure.
    pub fn list_messages(
        &self,
        mailbox: &str,
        account: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<PaginatedMessages> {
        let mailbox = require_text("mailbox", mailbox)?;
        let account = optional_text(account);
        let limit = require_limit(limit)?;
        info!(%mailbox, account = account.as_deref(), limit, offset, "listing messages");

        let target = Target {
            account: account.as_deref(),
            mailbox: Some(mailbox.as_str()),
            message: None,
        };

        let count = Query::MessageCount {
            mailbox: mailbox.clone(),
            account: account.clone(),
        };
        let total = decode_count(&self.run(&count, &target)?);

        let page = paginate(total, offset, limit);
        let Some(range) = page.range else {
            debug!(total, offset, "page is empty");
            return Ok(PaginatedMessages::empty(total, offset, page.limit));
        };

        let fetch = Query::MessageRange {
            mailbox: mailbox.clone(),
            account: account.clone(),
            start: range.start,
            end: range.end,
        };
        let mut messages = decode_headers(&self.run(&fetch, &target)?);
        messages.reverse();

        Ok(PaginatedMessages {
            messages,
            total,
            offset,
            limit: page.limit,
            has_more: page.has_more,
        })
    }

    /// Fetches one message with recipients, attachments and body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MessageNotFound`] when no message has this id
    /// in the mailbox, [`BridgeError::InvalidParameter`] for a blank mailbox
    /// or zero id, or a classified automation failure.
    pub fn get_message(
        &self,
        id: u64,
        mailbox: &str,
        account: Option<&str>,
    ) -> Result<MessageDetail> {
        let id = require_id(id)?;
        let mailbox = require_text("mailbox", mailbox)?;
        let account = optional_text(account);
        info!(id, %mailbox, account = account.as_deref(), "fetching message");

        let target = Target {
            account: account.as_deref(),
            mailbox: Some(mailbox.as_str()),
            message: Some(id),
        };
        let query = Query::Message {
            id,
            mailbox: mailbox.clone(),
            account: account.clone(),
        };
        let output = self.run(&query, &target)?;
        decode_detail(&output).ok_or_else(|| {
            warn!(id, "message payload could not be decoded");
            BridgeError::AutomationError(format!("Malformed message payload for id {id}"))
        })
    }

    /// Lists unread messages, at most `limit` (clamped to the page maximum).
    ///
    /// Without a mailbox, each in-scope account's inbox is scanned.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidParameter`] for a zero limit, a
    /// not-found case for an unknown account or mailbox, or a classified
    /// automation failure.
    pub fn list_unread(
        &self,
        account: Option<&str>,
        mailbox: Option<&str>,
        limit: u32,
    ) -> Result<Vec<MessageHeader>> {
        let account = optional_text(account);
        let mailbox = optional_text(mailbox);
        let limit = effective_limit(require_limit(limit)?);
        info!(
            account = account.as_deref(),
            mailbox = mailbox.as_deref(),
            limit,
            "listing unread messages"
        );

        let target = Target {
            account: account.as_deref(),
            mailbox: mailbox.as_deref(),
            message: None,
        };
        let query = Query::Unread {
            account: account.clone(),
            mailbox: mailbox.clone(),
            limit,
        };
        let output = self.run(&query, &target)?;
        Ok(truncate(decode_headers(&output), limit))
    }

    /// Finds messages whose subject or sender contains `query`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidParameter`] for blank text or a zero
    /// limit, a not-found case for an unknown account or mailbox, or a
    /// classified automation failure.
    pub fn search(
        &self,
        query: &str,
        account: Option<&str>,
        mailbox: Option<&str>,
        limit: u32,
    ) -> Result<Vec<MessageHeader>> {
        let text = require_text("query", query)?;
        let account = optional_text(account);
        let mailbox = optional_text(mailbox);
        let limit = effective_limit(require_limit(limit)?);
        info!(
            query = %text,
            account = account.as_deref(),
            mailbox = mailbox.as_deref(),
            limit,
            "searching messages"
        );

        let target = Target {
            account: account.as_deref(),
            mailbox: mailbox.as_deref(),
            message: None,
        };
        let search = Query::Search {
            text: text.clone(),
            account: account.clone(),
            mailbox: mailbox.clone(),
            limit,
        };
        let output = self.run(&search, &target)?;
        Ok(truncate(decode_headers(&output), limit))
    }
}

fn truncate(mut headers: Vec<MessageHeader>, limit: u32) -> Vec<MessageHeader> {
    headers.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    headers
}
