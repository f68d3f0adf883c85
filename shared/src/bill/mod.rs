//! Bill wire types
//!
//! Request payload shapes for posting a cashier bill:
//! - Line items: the selected subset of the bill, densely ordered
//! - Payments: tendered amounts plus their captured mode attributes
//! - Rounding: configuration for the bill's cash rounding line

pub mod types;

pub use types::{
    ItemPrice, RequestLineItem, RequestPayment, RequestPaymentAttribute, RoundingConfig,
    RoundingMode,
};
