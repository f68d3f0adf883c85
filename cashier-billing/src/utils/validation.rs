//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! chosen to match what the billing endpoints accept for display names
//! and captured attribute values.

use crate::utils::error::BillingError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names: items, prices, payment modes
pub const MAX_NAME_LEN: usize = 200;

/// Captured payment attribute values (cheque number, card reference, ...)
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> Result<(), BillingError> {
    if value.trim().is_empty() {
        return Err(BillingError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(BillingError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), BillingError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(BillingError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
