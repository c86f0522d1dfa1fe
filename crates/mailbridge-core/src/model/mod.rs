//! Records returned by the bridge operations.
//!
//! Every record is an immutable value built fresh from one script result.
//! Nothing is cached between calls.

mod account;
mod diagnostics;
mod mailbox;
mod message;

pub use account::{Account, AccountOrdinal};
pub use diagnostics::{Diagnostics, MailAccess};
pub use mailbox::Mailbox;
pub use message::{Attachment, MessageDetail, MessageHeader, PaginatedMessages};
