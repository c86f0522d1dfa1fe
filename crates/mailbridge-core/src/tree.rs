//! Two-level mailbox tree reconstruction.
//!
//! The mailbox script emits a flat list in which nested mailboxes carry the
//! name of their parent. Only one level of nesting is kept: a row whose
//! parent is not itself a top-level row of the same account is dropped.

use std::collections::HashMap;

use crate::model::Mailbox;

/// One flat mailbox row as decoded from script output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxRow {
    /// Mailbox name.
    pub name: String,
    /// Owning account name.
    pub account: String,
    /// Unread messages.
    pub unread_count: u32,
    /// Total messages.
    pub message_count: u32,
    /// Parent mailbox name, `None` at top level.
    pub parent: Option<String>,
}

/// Builds top-level mailboxes with their direct children attached.
///
/// Top-level order and child order both follow the input order.
#[must_use]
pub fn build_tree(rows: Vec<MailboxRow>) -> Vec<Mailbox> {
    let mut children: HashMap<(String, String), Vec<Mailbox>> = HashMap::new();
    let mut top_level = Vec::new();

    for row in rows {
        match row.parent {
            Some(parent) => {
                let child = Mailbox {
                    full_name: Mailbox::child_path(&row.account, &parent, &row.name),
                    name: row.name,
                    account: row.account.clone(),
                    unread_count: row.unread_count,
                    message_count: row.message_count,
                    children: Vec::new(),
                };
                children
                    .entry((row.account, parent))
                    .or_default()
                    .push(child);
            }
            None => top_level.push(row),
        }
    }

    let tree: Vec<Mailbox> = top_level
        .into_iter()
        .map(|row| {
            let key = (row.account, row.name);
            let kids = children.remove(&key).unwrap_or_default();
            let (account, name) = key;
            Mailbox {
                full_name: Mailbox::top_level_path(&account, &name),
                name,
                account,
                unread_count: row.unread_count,
                message_count: row.message_count,
                children: kids,
            }
        })
        .collect();

    if !children.is_empty() {
        let orphans: usize = children.values().map(Vec::len).sum();
        tracing::debug!(orphans, "dropped mailboxes without a top-level parent");
    }

    tree
}
