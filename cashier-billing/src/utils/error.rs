//! Billing error type
//!
//! Every variant is a precondition failure the caller consumes as
//! "do not submit"; nothing here panics or retries.

/// Errors surfaced by the billing helpers
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The bill has no selected line to post
    #[error("no line items selected")]
    EmptySelection,

    /// A price or tendered amount failed its bounds/finiteness checks
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A line quantity is non-positive or out of bounds
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A captured payment attribute failed the mode's type checks
    #[error("attribute validation failed: {0}")]
    AttributeValidation(String),

    /// Open/confirm/cancel called outside the dialog lifecycle
    #[error("invalid dialog state: {0}")]
    InvalidDialogState(String),

    /// A text field failed length/emptiness validation
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result alias for the billing helpers
pub type BillingResult<T> = Result<T, BillingError>;
