//! Mailbox model types.

use serde::{Deserialize, Serialize};

/// A mailbox with at most one level of nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    /// Mailbox name.
    pub name: String,
    /// `account/name`, or `account/parent/name` for a child.
    pub full_name: String,
    /// Owning account name.
    pub account: String,
    /// Unread messages.
    pub unread_count: u32,
    /// Total messages.
    pub message_count: u32,
    /// Nested mailboxes, in enumeration order. Always empty on children.
    pub children: Vec<Self>,
}

impl Mailbox {
    /// Synthesizes the full name of a top-level mailbox.
    #[must_use]
    pub fn top_level_path(account: &str, name: &str) -> String {
        format!("{account}/{name}")
    }

    /// Synthesizes the full name of a nested mailbox.
    #[must_use]
    pub fn child_path(account: &str, parent: &str, name: &str) -> String {
        format!("{account}/{parent}/{name}")
    }
}
