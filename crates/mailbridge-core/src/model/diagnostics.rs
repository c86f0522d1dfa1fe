//! Diagnostics report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the automation runtime could reach the mail application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailAccess {
    /// The probe script ran.
    Granted,
    /// The process lacks Automation permission for Mail.
    Denied,
    /// The probe failed for another reason.
    Error,
}

/// Result of probing the automation runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Bridge version.
    pub version: String,
    /// Where scripts are sent.
    pub executor: String,
    /// Probe outcome.
    pub mail_access: MailAccess,
    /// Accounts visible to the probe, when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_count: Option<u32>,
    /// Failure description, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
}
