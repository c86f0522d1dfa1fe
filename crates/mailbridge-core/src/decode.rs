//! Record decoders.
//!
//! Each decoder turns the delimited text of one script into typed records.
//! Decoding is lenient: a row with fewer columns than its shape requires is
//! dropped and logged, and unparseable scalars fall back to defaults. The
//! surviving rows keep their order.

use mailbridge_script::codec::{self, Record};

use crate::model::{Account, AccountOrdinal, Attachment, MessageDetail, MessageHeader};
use crate::sender::Sender;
use crate::tree::MailboxRow;

/// Minimum columns in an account row.
pub const ACCOUNT_FIELDS: usize = 5;

/// Minimum columns in a mailbox row (the parent column is optional).
pub const MAILBOX_FIELDS: usize = 4;

/// Minimum columns in a header row.
pub const HEADER_FIELDS: usize = 11;

/// Minimum columns in a detail row.
pub const DETAIL_FIELDS: usize = 14;

/// Columns packed into one attachment item.
const ATTACHMENT_FIELDS: usize = 3;

/// Case-insensitive `"true"`; anything else is false.
#[must_use]
pub fn parse_bool(field: &str) -> bool {
    field.trim().eq_ignore_ascii_case("true")
}

/// Parses a non-negative count, clamping to `0..=u32::MAX`.
#[must_use]
pub fn parse_count(field: &str) -> u32 {
    u32::try_from(parse_u64(field)).unwrap_or(u32::MAX)
}

/// Parses a non-negative integer.
///
/// Negative values clamp to 0 and unparseable text yields 0. Large numbers
/// that the runtime renders in exponent form (`1.5E+6`) are accepted.
#[must_use]
pub fn parse_u64(field: &str) -> u64 {
    let field = field.trim();
    if let Ok(n) = field.parse::<u64>() {
        return n;
    }
    if let Ok(n) = field.parse::<i64>() {
        return u64::try_from(n).unwrap_or(0);
    }
    match field.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(n) if n.is_finite() && n > 0.0 => n as u64,
        _ => 0,
    }
}

fn long_enough(record: &Record<'_>, min: usize, shape: &'static str) -> bool {
    if record.len() < min {
        tracing::debug!(shape, columns = record.len(), min, "dropping short row");
        false
    } else {
        true
    }
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(ToString::to_string).collect()
}

/// Decodes account rows.
///
/// Ordinals come from the raw row position, so a dropped row leaves a gap
/// rather than renumbering the accounts after it.
#[must_use]
pub fn decode_accounts(payload: &str) -> Vec<Account> {
    codec::split_records(payload)
        .into_iter()
        .enumerate()
        .filter(|(_, record)| long_enough(record, ACCOUNT_FIELDS, "account"))
        .map(|(index, record)| Account {
            id: AccountOrdinal::from_index(index),
            name: record.field(0).to_string(),
            full_name: record.field(1).to_string(),
            email_addresses: owned(record.list(2)),
            account_type: record.field(3).to_string(),
            enabled: parse_bool(record.field(4)),
        })
        .collect()
}

/// Decodes flat mailbox rows for tree reconstruction.
#[must_use]
pub fn decode_mailbox_rows(payload: &str) -> Vec<MailboxRow> {
    codec::split_records(payload)
        .into_iter()
        .filter(|record| long_enough(record, MAILBOX_FIELDS, "mailbox"))
        .map(|record| {
            let parent = record.field(4);
            MailboxRow {
                name: record.field(0).to_string(),
                account: record.field(1).to_string(),
                unread_count: parse_count(record.field(2)),
                message_count: parse_count(record.field(3)),
                parent: (!parent.is_empty()).then(|| parent.to_string()),
            }
        })
        .collect()
}

/// Decodes header rows, in payload order.
#[must_use]
pub fn decode_headers(payload: &str) -> Vec<MessageHeader> {
    codec::split_records(payload)
        .into_iter()
        .filter(|record| long_enough(record, HEADER_FIELDS, "header"))
        .map(|record| {
            let sender = record.field(2);
            let parsed = Sender::parse(sender);
            MessageHeader {
                id: parse_u64(record.field(0)),
                message_id: record.field(1).to_string(),
                sender: sender.to_string(),
                sender_name: parsed.name,
                sender_email: parsed.email,
                date_sent: record.field(3).to_string(),
                date_received: record.field(4).to_string(),
                is_read: parse_bool(record.field(5)),
                is_flagged: parse_bool(record.field(6)),
                has_attachments: parse_u64(record.field(7)) > 0,
                mailbox: record.field(8).to_string(),
                account: record.field(9).to_string(),
                subject: record.remainder(10),
            }
        })
        .collect()
}

/// Decodes a single detail row.
///
/// The payload is never split into records, so a body containing the
/// record separator is returned intact. Returns `None` when the payload is
/// empty or too short.
#[must_use]
pub fn decode_detail(payload: &str) -> Option<MessageDetail> {
    let record = Record::single(payload)?;
    if !long_enough(&record, DETAIL_FIELDS, "detail") {
        return None;
    }

    let sender = record.field(2);
    let parsed = Sender::parse(sender);
    let items = record.list(11);
    let has_attachments = !items.is_empty();
    let attachments: Vec<Attachment> = items
        .into_iter()
        .filter_map(|item| {
            let columns = codec::split_attachment(item);
            if columns.len() < ATTACHMENT_FIELDS {
                tracing::debug!(columns = columns.len(), "dropping short attachment");
                return None;
            }
            Some(Attachment {
                name: columns[0].to_string(),
                mime_type: columns[1].to_string(),
                file_size: parse_u64(columns[2]),
            })
        })
        .collect();

    let header = MessageHeader {
        id: parse_u64(record.field(0)),
        message_id: record.field(1).to_string(),
        sender: sender.to_string(),
        sender_name: parsed.name,
        sender_email: parsed.email,
        date_sent: record.field(3).to_string(),
        date_received: record.field(4).to_string(),
        is_read: parse_bool(record.field(5)),
        is_flagged: parse_bool(record.field(6)),
        has_attachments,
        mailbox: record.field(7).to_string(),
        account: record.field(8).to_string(),
        subject: record.field(12).to_string(),
    };

    Some(MessageDetail {
        header,
        to_recipients: owned(record.list(9)),
        cc_recipients: owned(record.list(10)),
        content: record.remainder(13),
        attachments,
    })
}

/// Decodes a bare count.
#[must_use]
pub fn decode_count(payload: &str) -> u32 {
    parse_count(codec::strip_output(payload))
}
