//! Service layer bridging the command surface with the script protocol.

pub mod mail;
pub mod validation;

pub use mail::{MailService, VERSION};
