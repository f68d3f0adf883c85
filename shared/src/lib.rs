//! Shared types for the cashier billing module
//!
//! Wire/request shapes exchanged between the billing screen and its
//! collaborators (the form controller and the save/post endpoints).

pub mod bill;

// Re-exports
pub use bill::{
    ItemPrice, RequestLineItem, RequestPayment, RequestPaymentAttribute, RoundingConfig,
    RoundingMode,
};
