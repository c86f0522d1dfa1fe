//! Message model types.

use serde::{Deserialize, Serialize};

/// Summary of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeader {
    /// Store-assigned id, stable within a mailbox. Used to fetch details.
    pub id: u64,
    /// RFC 5322 `Message-ID`.
    pub message_id: String,
    /// Message subject.
    pub subject: String,
    /// Raw sender string as reported by the application.
    pub sender: String,
    /// Display name split from `sender`.
    pub sender_name: String,
    /// Address split from `sender` (empty if none was found).
    pub sender_email: String,
    /// Date sent, in the application's own format.
    pub date_sent: String,
    /// Date received, in the application's own format.
    pub date_received: String,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Whether the message is flagged.
    pub is_flagged: bool,
    /// Whether the message has at least one attachment.
    pub has_attachments: bool,
    /// Mailbox holding the message.
    pub mailbox: String,
    /// Account holding the mailbox.
    pub account: String,
}

/// An attachment's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Filename.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub file_size: u64,
}

/// Full content of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    /// Header fields.
    #[serde(flatten)]
    pub header: MessageHeader,
    /// `To` addresses.
    pub to_recipients: Vec<String>,
    /// `Cc` addresses.
    pub cc_recipients: Vec<String>,
    /// Plain-text body.
    pub content: String,
    /// Attachments.
    pub attachments: Vec<Attachment>,
}

/// One newest-first page of a mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedMessages {
    /// Headers, newest first.
    pub messages: Vec<MessageHeader>,
    /// Messages in the mailbox.
    pub total: u32,
    /// Messages skipped from the newest end.
    pub offset: u32,
    /// Page size after clamping.
    pub limit: u32,
    /// Whether older messages remain past this page.
    pub has_more: bool,
}

impl PaginatedMessages {
    /// A page with no messages.
    #[must_use]
    pub const fn empty(total: u32, offset: u32, limit: u32) -> Self {
        Self {
            messages: Vec::new(),
            total,
            offset,
            limit,
            has_more: false,
        }
    }
}
