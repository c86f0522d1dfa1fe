//! AppleScript query builder.
//!
//! Every read-only operation maps to one [`Query`], which renders to a
//! self-contained [`Script`]. Scripts batch all rows into a single delimited
//! string (see [`crate::codec`]) so each operation costs one round trip to
//! the automation runtime.

mod serialize;

pub use serialize::escape;

use serialize::{
    write_account_scope, write_handlers, write_header_handler, write_mailbox_handler,
    write_mailbox_lookup, write_scan,
};

/// Script error number raised when a named account does not exist.
pub const ACCOUNT_NOT_FOUND: i32 = 10001;

/// Script error number raised when a named mailbox does not exist.
pub const MAILBOX_NOT_FOUND: i32 = 10002;

/// Script error number raised when a message id is not in the mailbox.
pub const MESSAGE_NOT_FOUND: i32 = 10003;

/// Mailbox scanned by unread and search queries when none is named.
pub const DEFAULT_SCAN_MAILBOX: &str = "INBOX";

/// A read-only query against the mail store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Checks that the application answers and counts its accounts.
    Probe,
    /// Lists every account.
    Accounts,
    /// Lists mailboxes with their parent names.
    Mailboxes {
        /// Restrict to one account.
        account: Option<String>,
    },
    /// Counts the messages in one mailbox.
    MessageCount {
        /// Mailbox name.
        mailbox: String,
        /// Owning account (first match when absent).
        account: Option<String>,
    },
    /// Fetches headers for an inclusive, 1-based index range.
    MessageRange {
        /// Mailbox name.
        mailbox: String,
        /// Owning account (first match when absent).
        account: Option<String>,
        /// First index (inclusive).
        start: u32,
        /// Last index (inclusive).
        end: u32,
    },
    /// Fetches one message with recipients, attachments and body.
    Message {
        /// Store-assigned message id.
        id: u64,
        /// Mailbox name.
        mailbox: String,
        /// Owning account (first match when absent).
        account: Option<String>,
    },
    /// Scans for unread messages.
    Unread {
        /// Restrict to one account.
        account: Option<String>,
        /// Mailbox to scan in each account (`INBOX` when absent).
        mailbox: Option<String>,
        /// Maximum rows returned.
        limit: u32,
    },
    /// Scans for messages whose subject or sender contains the text.
    Search {
        /// Text to look for.
        text: String,
        /// Restrict to one account.
        account: Option<String>,
        /// Mailbox to scan in each account (`INBOX` when absent).
        mailbox: Option<String>,
        /// Maximum rows returned.
        limit: u32,
    },
}

impl Query {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Probe => "probe",
            Self::Accounts => "accounts",
            Self::Mailboxes { .. } => "mailboxes",
            Self::MessageCount { .. } => "message-count",
            Self::MessageRange { .. } => "message-range",
            Self::Message { .. } => "message",
            Self::Unread { .. } => "unread",
            Self::Search { .. } => "search",
        }
    }

    /// Renders the query as AppleScript source.
    #[must_use]
    pub fn to_script(&self) -> Script {
        let mut out = String::new();
        match self {
            Self::Probe => {
                out.push_str("tell application \"Mail\"\n");
                out.push_str("\treturn (count of accounts) as text\n");
                out.push_str("end tell\n");
            }
            Self::Accounts => {
                write_handlers(&mut out);
                out.push_str("set rows to {}\n");
                out.push_str("tell application \"Mail\"\n");
                out.push_str("\trepeat with acc in every account\n");
                out.push_str(
                    "\t\tset addrList to {}\n\
                     \t\trepeat with addr in email addresses of acc\n\
                     \t\t\tset end of addrList to my txt(contents of addr)\n\
                     \t\tend repeat\n\
                     \t\tset end of rows to my joinList({my txt(name of acc), my txt(full name of acc), \
                     my joinList(addrList, GS), my txt(account type of acc), \
                     my txt(enabled of acc)}, US)\n",
                );
                out.push_str("\tend repeat\n");
                out.push_str("end tell\n");
                out.push_str("return my joinList(rows, RS)\n");
            }
            Self::Mailboxes { account } => {
                write_handlers(&mut out);
                write_mailbox_handler(&mut out);
                out.push_str("set rows to {}\n");
                out.push_str("tell application \"Mail\"\n");
                write_account_scope(&mut out, account.as_deref());
                out.push_str("\trepeat with acc in targetAccounts\n");
                out.push_str("\t\tset accName to my txt(name of acc)\n");
                out.push_str("\t\trepeat with mb in every mailbox of acc\n");
                out.push_str("\t\t\tset end of rows to my mailboxRow(mb, accName)\n");
                out.push_str("\t\tend repeat\n");
                out.push_str("\tend repeat\n");
                out.push_str("end tell\n");
                out.push_str("return my joinList(rows, RS)\n");
            }
            Self::MessageCount { mailbox, account } => {
                write_handlers(&mut out);
                out.push_str("tell application \"Mail\"\n");
                write_mailbox_lookup(&mut out, mailbox, account.as_deref());
                out.push_str("\treturn (count of messages of targetMailbox) as text\n");
                out.push_str("end tell\n");
            }
            Self::MessageRange {
                mailbox,
                account,
                start,
                end,
            } => {
                write_handlers(&mut out);
                write_header_handler(&mut out);
                out.push_str("set rows to {}\n");
                out.push_str("tell application \"Mail\"\n");
                write_mailbox_lookup(&mut out, mailbox, account.as_deref());
                out.push_str(&format!(
                    "\tset msgs to messages {start} thru {end} of targetMailbox\n"
                ));
                out.push_str("\tif class of msgs is not list then set msgs to {msgs}\n");
                out.push_str("\trepeat with msg in msgs\n");
                out.push_str("\t\tset end of rows to my headerRow(msg, mbName, accName)\n");
                out.push_str("\tend repeat\n");
                out.push_str("end tell\n");
                out.push_str("return my joinList(rows, RS)\n");
            }
            Self::Message {
                id,
                mailbox,
                account,
            } => {
                write_handlers(&mut out);
                out.push_str("tell application \"Mail\"\n");
                write_mailbox_lookup(&mut out, mailbox, account.as_deref());
                out.push_str(&format!(
                    "\tset hits to (messages of targetMailbox whose id is {id})\n"
                ));
                out.push_str(&format!(
                    "\tif (count of hits) is 0 then error \"Message not found: {id}\" number {MESSAGE_NOT_FOUND}\n"
                ));
                out.push_str("\tset msg to item 1 of hits\n");
                out.push_str("\tset toList to {}\n");
                out.push_str("\trepeat with r in every to recipient of msg\n");
                out.push_str("\t\tset end of toList to my txt(address of r)\n");
                out.push_str("\tend repeat\n");
                out.push_str("\tset ccList to {}\n");
                out.push_str("\trepeat with r in every cc recipient of msg\n");
                out.push_str("\t\tset end of ccList to my txt(address of r)\n");
                out.push_str("\tend repeat\n");
                out.push_str("\tset attList to {}\n");
                out.push_str("\trepeat with att in every mail attachment of msg\n");
                out.push_str(
                    "\t\tset end of attList to my joinList({my txt(name of att), \
                     my txt(MIME type of att), my txt(file size of att)}, FS)\n",
                );
                out.push_str("\tend repeat\n");
                out.push_str(
                    "\tset fields to {my txt(id of msg), my txt(message id of msg), \
                     my txt(sender of msg), my txt(date sent of msg), my txt(date received of msg), \
                     my txt(read status of msg), my txt(flagged status of msg), mbName, accName, \
                     my joinList(toList, GS), my joinList(ccList, GS), my joinList(attList, GS), \
                     my txt(subject of msg), my raw(content of msg)}\n",
                );
                out.push_str("end tell\n");
                out.push_str("return my joinList(fields, US)\n");
            }
            Self::Unread {
                account,
                mailbox,
                limit,
            } => {
                write_scan(
                    &mut out,
                    account.as_deref(),
                    mailbox.as_deref(),
                    "read status is false",
                    *limit,
                );
            }
            Self::Search {
                text,
                account,
                mailbox,
                limit,
            } => {
                let needle = escape(text);
                let filter = format!("subject contains \"{needle}\" or sender contains \"{needle}\"");
                write_scan(
                    &mut out,
                    account.as_deref(),
                    mailbox.as_deref(),
                    &filter,
                    *limit,
                );
            }
        }

        Script {
            name: self.name(),
            source: out,
        }
    }
}

/// Rendered AppleScript ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    name: &'static str,
    source: String,
}

impl Script {
    /// Wraps raw source under a log name.
    #[must_use]
    pub fn new(name: &'static str, source: impl Into<String>) -> Self {
        Self {
            name,
            source: source.into(),
        }
    }

    /// Log name of the query that produced this script.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// AppleScript source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}
