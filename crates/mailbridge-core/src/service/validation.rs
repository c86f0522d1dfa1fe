//! Parameter validation, run before any script is built.

use crate::error::{BridgeError, Result};

/// Returns the text unchanged, rejecting blank input.
///
/// Mail names may carry meaningful surrounding spaces, so only the
/// blankness check looks at the trimmed text.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidParameter`] naming `field` when `value` is
/// empty or whitespace.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidParameter(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Treats blank optional text as absent.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(ToString::to_string)
}

/// Rejects a zero page size.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidParameter`] when `limit` is 0.
pub fn require_limit(limit: u32) -> Result<u32> {
    if limit == 0 {
        return Err(BridgeError::InvalidParameter(
            "limit must be at least 1".into(),
        ));
    }
    Ok(limit)
}

/// Rejects message id 0, which the store never assigns.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidParameter`] when `id` is 0.
pub fn require_id(id: u64) -> Result<u64> {
    if id == 0 {
        return Err(BridgeError::InvalidParameter("id must be at least 1".into()));
    }
    Ok(id)
}
