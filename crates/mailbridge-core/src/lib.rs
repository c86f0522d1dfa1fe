//! # mailbridge-core
//!
//! Domain layer of the Apple Mail bridge.
//!
//! This crate provides:
//! - Domain models (accounts, mailboxes, message headers and details)
//! - Record decoders for the delimited script output
//! - Mailbox tree reconstruction
//! - Newest-first pagination over the mail store's oldest-first indexes
//! - Sender string parsing
//! - The error taxonomy and the `{status, data, error}` envelope
//! - [`MailService`], the read-only operations, generic over any
//!   [`mailbridge_script::ScriptExecutor`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod envelope;
mod error;
pub mod model;
pub mod pagination;
pub mod sender;
pub mod service;
pub mod tree;

pub use envelope::{BridgeEnvelope, Status};
pub use error::{BridgeError, Result, Target};
pub use model::{
    Account, AccountOrdinal, Attachment, Diagnostics, MailAccess, Mailbox, MessageDetail,
    MessageHeader, PaginatedMessages,
};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, paginate};
pub use sender::Sender;
pub use service::{MailService, VERSION};
