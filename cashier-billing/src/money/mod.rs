//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations run on `Decimal` internally; `f64` only crosses the
//! API boundary, rounded to 2 decimal places on the way out.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::bill::{RoundingConfig, RoundingMode};

use crate::bill::LineItem;
use crate::utils::error::BillingError;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per bill line
pub(crate) const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per bill line
pub(crate) const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed tendered amount per payment
pub(crate) const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), BillingError> {
    if !value.is_finite() {
        return Err(BillingError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption in the bill totals.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with inputs bounded at the boundary
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Priced entity as shown on the billing screen (price list entry,
/// payment mode, ...). Display formatting input only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&shared::bill::ItemPrice> for PricedItem {
    fn from(price: &shared::bill::ItemPrice) -> Self {
        Self {
            price: Some(price.price),
            name: price.name.clone(),
        }
    }
}

/// Render a priced entity for display
///
/// The price is rounded to the cent (half-up) and rendered with exactly
/// two fractional digits; a present, non-empty name is appended
/// parenthesized (`"10.00 (Cash)"`). A missing price renders empty.
pub fn format_item_price(item: &PricedItem) -> String {
    let Some(price) = item.price else {
        return String::new();
    };
    let price = format!("{:.2}", to_f64(to_decimal(price)));

    match item.name.as_deref() {
        Some(name) if !name.is_empty() => format!("{} ({})", price, name),
        _ => price,
    }
}

/// Round a line total to the configured cash denomination
///
/// A step of 0 disables rounding and returns the value unchanged. The
/// result is decimal-correct to the cent; bit-exact float reproduction is
/// not a goal.
pub fn round_item_price(value: f64, nearest: f64, mode: RoundingMode) -> f64 {
    if nearest <= 0.0 {
        return value;
    }
    let step = to_decimal(nearest);
    let scaled = to_decimal(value) / step;
    let rounded = match mode {
        RoundingMode::Floor => scaled.floor(),
        RoundingMode::Ceiling => scaled.ceil(),
        RoundingMode::Nearest => {
            scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
    };
    to_f64(rounded * step)
}

/// Total payable over the selected bill lines
///
/// With a rounding config, every line other than the designated rounding
/// line contributes its rounded total; the rounding line itself is added
/// raw, so the bill absorbs the rounding delta as a visible entry. Without
/// a config, raw totals are summed.
pub fn calculate_total_payable(
    line_items: &[LineItem],
    rounding: Option<&RoundingConfig>,
) -> f64 {
    let mut total = Decimal::ZERO;

    for line in line_items.iter().filter(|l| l.is_selected()) {
        let contribution = match rounding {
            Some(config) if config.rounding_item_uuid != line.item_stock.uuid => to_decimal(
                round_item_price(line.total(), config.round_to_nearest, config.rounding_mode),
            ),
            _ => to_decimal(line.total()),
        };
        total += contribution;
    }

    to_f64(total)
}

/// Validate a bill line before it is transformed into a request line
pub fn validate_line_item(line: &LineItem) -> Result<(), BillingError> {
    let price = line.item_stock_price.price;
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(BillingError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(BillingError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }

    let quantity = line.item_stock_quantity;
    if quantity <= 0 {
        return Err(BillingError::InvalidQuantity(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(BillingError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }

    validate_optional_text(&line.item_stock_price.name, "price name", MAX_NAME_LEN)?;

    Ok(())
}

/// Validate a tendered amount before a payment is created
pub fn validate_tendered(amount: f64) -> Result<(), BillingError> {
    require_finite(amount, "tendered amount")?;
    if amount <= 0.0 {
        return Err(BillingError::InvalidAmount(format!(
            "tendered amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(BillingError::InvalidAmount(format!(
            "tendered amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Check if payment is sufficient (with small tolerance for edge cases)
///
/// Returns true if paid >= required - 0.01
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    let paid_dec = to_decimal(paid);
    let required_dec = to_decimal(required);
    paid_dec >= required_dec - MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
