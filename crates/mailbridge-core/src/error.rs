//! Error taxonomy for bridge operations.

use mailbridge_script::ScriptError;
use mailbridge_script::query::{ACCOUNT_NOT_FOUND, MAILBOX_NOT_FOUND, MESSAGE_NOT_FOUND};
use thiserror::Error;

/// Every way a bridge operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The process is not allowed to automate Mail.
    #[error(
        "Mail access denied: allow this app to control Mail in System Settings > Privacy & Security > Automation"
    )]
    MailAccessDenied,

    /// The named account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The named mailbox does not exist.
    #[error("Mailbox not found: {0}")]
    MailboxNotFound(String),

    /// No message with this id exists in the mailbox.
    #[error("Message not found: {0}")]
    MessageNotFound(u64),

    /// Any other failure reported by the automation runtime.
    #[error("Automation error: {0}")]
    AutomationError(String),

    /// A caller-supplied argument was rejected before any script ran.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// What an operation was looking up, used to name not-found failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Target<'a> {
    /// Requested account.
    pub account: Option<&'a str>,
    /// Requested mailbox.
    pub mailbox: Option<&'a str>,
    /// Requested message id.
    pub message: Option<u64>,
}

impl BridgeError {
    /// Maps a script failure onto the taxonomy.
    ///
    /// The not-authorized error number always yields
    /// [`BridgeError::MailAccessDenied`]. The bridge's own not-found numbers
    /// yield the matching not-found case. Everything else, including
    /// timeouts and launch failures, becomes [`BridgeError::AutomationError`]
    /// carrying the runtime's message.
    #[must_use]
    pub fn classify(err: &ScriptError, target: &Target<'_>) -> Self {
        let message = err.message();
        match err.code() {
            Some(ScriptError::NOT_AUTHORIZED) => Self::MailAccessDenied,
            Some(ACCOUNT_NOT_FOUND) => {
                Self::AccountNotFound(target.account.map_or(message, ToString::to_string))
            }
            Some(MAILBOX_NOT_FOUND) => {
                Self::MailboxNotFound(target.mailbox.map_or(message, ToString::to_string))
            }
            Some(MESSAGE_NOT_FOUND) => match target.message {
                Some(id) => Self::MessageNotFound(id),
                None => Self::AutomationError(message),
            },
            _ => Self::AutomationError(message),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn failed(code: i32, message: &str) -> ScriptError {
        ScriptError::Failed {
            code,
            message: message.into(),
        }
    }

    #[test]
    fn not_authorized_is_access_denied() {
        let err = failed(-1743, "Not authorized to send Apple events to Mail.");
        assert_eq!(
            BridgeError::classify(&err, &Target::default()),
            BridgeError::MailAccessDenied
        );
    }

    #[test]
    fn not_authorized_wins_regardless_of_target() {
        let target = Target {
            account: Some("Work"),
            mailbox: Some("INBOX"),
            message: Some(9),
        };
        let err = failed(ScriptError::NOT_AUTHORIZED, "anything");
        assert_eq!(BridgeError::classify(&err, &target), BridgeError::MailAccessDenied);
    }

    #[test]
    fn other_codes_keep_message() {
        let err = failed(-1728, "Mail got an error: Can’t get mailbox 1.");
        assert_eq!(
            BridgeError::classify(&err, &Target::default()),
            BridgeError::AutomationError("Mail got an error: Can’t get mailbox 1.".into())
        );
    }

    #[test]
    fn not_found_codes_use_target() {
        let target = Target {
            account: Some("Work"),
            mailbox: Some("Receipts"),
            message: Some(42),
        };
        assert_eq!(
            BridgeError::classify(&failed(ACCOUNT_NOT_FOUND, "x"), &target),
            BridgeError::AccountNotFound("Work".into())
        );
        assert_eq!(
            BridgeError::classify(&failed(MAILBOX_NOT_FOUND, "x"), &target),
            BridgeError::MailboxNotFound("Receipts".into())
        );
        assert_eq!(
            BridgeError::classify(&failed(MESSAGE_NOT_FOUND, "x"), &target),
            BridgeError::MessageNotFound(42)
        );
    }

    #[test]
    fn message_not_found_without_id_is_automation_error() {
        assert_eq!(
            BridgeError::classify(&failed(MESSAGE_NOT_FOUND, "Message not found: 3"), &Target::default()),
            BridgeError::AutomationError("Message not found: 3".into())
        );
    }

    #[test]
    fn timeout_is_automation_error() {
        let err = ScriptError::Timeout(Duration::from_secs(30));
        assert_eq!(
            BridgeError::classify(&err, &Target::default()),
            BridgeError::AutomationError("Script timed out after 30s".into())
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            BridgeError::MessageNotFound(12).to_string(),
            "Message not found: 12"
        );
        assert_eq!(
            BridgeError::InvalidParameter("limit must be at least 1".into()).to_string(),
            "Invalid parameter: limit must be at least 1"
        );
        assert!(BridgeError::MailAccessDenied.to_string().starts_with("Mail access denied"));
    }
}
