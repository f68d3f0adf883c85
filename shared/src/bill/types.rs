//! Shared types for the cashier bill request payload

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// One entry of an item's price list
///
/// Also used as the price snapshot reconstructed from a saved bill line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPrice {
    pub uuid: String,
    /// Display name of the price (e.g. "Cash", "Insurance")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub price: f64,
}

/// Request-ready bill line, as posted to the billing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLineItem {
    /// Item stock uuid
    pub item: String,
    /// Zero-based position, dense over the selected subset of the bill
    pub line_item_order: i32,
    pub price: f64,
    /// Empty string when the price carries no display name
    #[serde(default)]
    pub price_name: String,
    pub price_uuid: String,
    pub quantity: i32,
}

/// Captured payment attribute, reduced to its wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPaymentAttribute {
    /// Bare attribute-type uuid
    pub attribute_type: String,
    pub value: String,
}

/// Payment as posted to the billing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayment {
    /// Always present on the wire, possibly empty
    #[serde(default)]
    pub attributes: Vec<RequestPaymentAttribute>,
    pub amount: f64,
    pub amount_tendered: f64,
    /// Bare payment-mode uuid
    pub instance_type: String,
}

impl RequestPayment {
    /// Change owed for a cash tender: tendered minus amount, never negative.
    /// Computed on `Decimal` and rounded to the cent, half up.
    pub fn change(&self) -> f64 {
        let tendered = Decimal::from_f64(self.amount_tendered).unwrap_or(Decimal::ZERO);
        let amount = Decimal::from_f64(self.amount).unwrap_or(Decimal::ZERO);
        (tendered - amount)
            .max(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0)
    }
}

/// Rounding direction for the bill's cash rounding rule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    Floor,
    Ceiling,
    #[default]
    Nearest,
}

/// Cash rounding configuration for the cashier bill
///
/// Names the synthetic bill line that absorbs the rounding delta and the
/// denomination every other line's total is rounded to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundingConfig {
    pub rounding_item_uuid: String,
    /// Rounding step in currency units; 0 disables rounding
    pub round_to_nearest: f64,
    #[serde(default)]
    pub rounding_mode: RoundingMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_item_wire_names() {
        let line = RequestLineItem {
            item: "item-1".to_string(),
            line_item_order: 0,
            price: 12.5,
            price_name: "Cash".to_string(),
            price_uuid: "price-1".to_string(),
            quantity: 2,
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["item"], "item-1");
        assert_eq!(json["lineItemOrder"], 0);
        assert_eq!(json["priceName"], "Cash");
        assert_eq!(json["priceUuid"], "price-1");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_request_payment_attributes_always_on_wire() {
        let payment = RequestPayment {
            attributes: vec![],
            amount: 50.0,
            amount_tendered: 50.0,
            instance_type: "mode-1".to_string(),
        };

        let json = serde_json::to_value(&payment).unwrap();
        assert!(json["attributes"].as_array().unwrap().is_empty());
        assert_eq!(json["amountTendered"], 50.0);
        assert_eq!(json["instanceType"], "mode-1");
    }

    #[test]
    fn test_rounding_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&RoundingMode::Floor).unwrap(),
            "\"FLOOR\""
        );
        assert_eq!(
            serde_json::to_string(&RoundingMode::Ceiling).unwrap(),
            "\"CEILING\""
        );
        assert_eq!(
            serde_json::from_str::<RoundingMode>("\"NEAREST\"").unwrap(),
            RoundingMode::Nearest
        );
    }

    #[test]
    fn test_rounding_mode_defaults_to_nearest() {
        let config: RoundingConfig = serde_json::from_str(
            r#"{"roundingItemUuid": "round-1", "roundToNearest": 0.5}"#,
        )
        .unwrap();
        assert_eq!(config.rounding_mode, RoundingMode::Nearest);
    }

    #[test]
    fn test_payment_change() {
        let payment = RequestPayment {
            attributes: vec![],
            amount: 85.0,
            amount_tendered: 100.0,
            instance_type: "mode-1".to_string(),
        };
        assert_eq!(payment.change(), 15.0);
    }

    #[test]
    fn test_payment_change_never_negative() {
        let payment = RequestPayment {
            attributes: vec![],
            amount: 100.0,
            amount_tendered: 80.0,
            instance_type: "mode-1".to_string(),
        };
        assert_eq!(payment.change(), 0.0);
    }

    #[test]
    fn test_payment_change_decimal_exact() {
        // 0.1 + 0.2 style inputs must not leak float noise into the change
        let payment = RequestPayment {
            attributes: vec![],
            amount: 0.1,
            amount_tendered: 0.3,
            instance_type: "mode-1".to_string(),
        };
        assert_eq!(payment.change(), 0.2);
    }
}
