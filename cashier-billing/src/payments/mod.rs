//! Payment transforms
//!
//! Reduces UI-held payments to their request shape and builds the request
//! payment for a freshly captured tender. Attribute-type checking sits
//! behind the `AttributeTypeValidator` trait; `ModeAttributeTypeValidator`
//! is the standard implementation.

use serde::{Deserialize, Serialize};
use shared::bill::{RequestPayment, RequestPaymentAttribute};

use crate::money;
use crate::utils::error::BillingError;
use crate::utils::validation::{MAX_ATTRIBUTE_VALUE_LEN, validate_required_text};

/// Attribute-type reference carried by a captured payment attribute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeTypeRef {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Extra field captured for a payment (cheque number, card reference, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAttribute {
    pub attribute_type: AttributeTypeRef,
    pub value: String,
}

/// Payment-mode reference selected on the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentModeRef {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Payment as held by the cashier form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub attributes: Vec<PaymentAttribute>,
    pub amount: f64,
    pub amount_tendered: f64,
    pub instance_type: PaymentModeRef,
}

/// Attribute-type definition attached to a payment mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeTypeDefinition {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

/// Checks captured attribute values against the payment mode's
/// attribute-type definitions and produces the request records
pub trait AttributeTypeValidator {
    fn validate_attribute_types(
        &self,
        definitions: &[AttributeTypeDefinition],
        values: &[PaymentAttribute],
    ) -> Result<Vec<RequestPaymentAttribute>, BillingError>;
}

/// Standard attribute-type validator
///
/// Every required definition must be matched by a non-empty captured
/// value; captured values for undefined types are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeAttributeTypeValidator;

impl AttributeTypeValidator for ModeAttributeTypeValidator {
    fn validate_attribute_types(
        &self,
        definitions: &[AttributeTypeDefinition],
        values: &[PaymentAttribute],
    ) -> Result<Vec<RequestPaymentAttribute>, BillingError> {
        let mut validated = Vec::new();

        for definition in definitions {
            let value = values
                .iter()
                .find(|v| v.attribute_type.uuid == definition.uuid);
            match value {
                Some(attr) if !attr.value.trim().is_empty() => {
                    validate_required_text(&attr.value, &definition.name, MAX_ATTRIBUTE_VALUE_LEN)?;
                    validated.push(RequestPaymentAttribute {
                        attribute_type: definition.uuid.clone(),
                        value: attr.value.clone(),
                    });
                }
                _ if definition.required => {
                    return Err(BillingError::AttributeValidation(format!(
                        "missing required attribute: {}",
                        definition.name
                    )));
                }
                _ => {}
            }
        }

        Ok(validated)
    }
}

/// Reduce UI payments to their request shape
///
/// Empty input maps to an empty list; callers must not assume a payload
/// was produced.
pub fn populate_payments(payments: &[Payment]) -> Vec<RequestPayment> {
    payments
        .iter()
        .map(|payment| RequestPayment {
            attributes: payment
                .attributes
                .iter()
                .map(|attr| RequestPaymentAttribute {
                    attribute_type: attr.attribute_type.uuid.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
            amount: payment.amount,
            amount_tendered: payment.amount_tendered,
            instance_type: payment.instance_type.uuid.clone(),
        })
        .collect()
}

/// Build the request payment for a freshly captured tender
///
/// `amount` always mirrors `amount_tendered` on the created payment.
/// Validator failure means the caller must not submit.
pub fn create_payment(
    validator: &dyn AttributeTypeValidator,
    payment_mode_attributes: &[AttributeTypeDefinition],
    attributes: &[PaymentAttribute],
    amount_tendered: f64,
    payment_mode_uuid: &str,
) -> Result<RequestPayment, BillingError> {
    money::validate_tendered(amount_tendered)?;
    let validated = validator.validate_attribute_types(payment_mode_attributes, attributes)?;

    Ok(RequestPayment {
        attributes: validated,
        amount: amount_tendered,
        amount_tendered,
        instance_type: payment_mode_uuid.to_string(),
    })
}
