//! Uniform success/failure wrapper for operation results.

use serde::Serialize;

use crate::error::BridgeError;

/// Outcome tag of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation succeeded and `data` is set.
    Ok,
    /// The operation failed and `error` is set.
    Error,
}

/// `{status, data, error}` wrapper around every operation result.
///
/// Exactly one of `data` and `error` is present, as selected by `status`.
/// Fields are private so that invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeEnvelope<T> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> BridgeEnvelope<T> {
    /// Wraps a successful result.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            status: Status::Ok,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure using its rendered description.
    #[must_use]
    pub fn error(err: &BridgeError) -> Self {
        Self {
            status: Status::Error,
            data: None,
            error: Some(err.to_string()),
        }
    }

    /// Outcome tag.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns true for a successful result.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok)
    }

    /// Payload of a successful result.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Message of a failed result.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T: Serialize> BridgeEnvelope<T> {
    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl<T> From<Result<T, BridgeError>> for BridgeEnvelope<T> {
    fn from(result: Result<T, BridgeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::error(&err),
        }
    }
}
