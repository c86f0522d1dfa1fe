//! Account model types.

use serde::{Deserialize, Serialize};

/// Position of an account in one enumeration, starting at 1.
///
/// This is an ephemeral ordinal, not a durable key: it is only meaningful
/// within the response that produced it and shifts whenever the mail
/// application's account order changes. Look accounts up by name instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountOrdinal(pub u32);

impl AccountOrdinal {
    /// Ordinal for the zero-based enumeration `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX - 1).saturating_add(1))
    }

    /// Returns the ordinal value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AccountOrdinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mail account as configured in the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Ephemeral position in this enumeration.
    pub id: AccountOrdinal,
    /// Account name shown in the application.
    pub name: String,
    /// User's full name.
    pub full_name: String,
    /// Addresses the account sends as.
    pub email_addresses: Vec<String>,
    /// Account kind reported by the application (imap, pop, iCloud, ...).
    pub account_type: String,
    /// Whether the account is enabled.
    pub enabled: bool,
}
