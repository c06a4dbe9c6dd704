//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CurrencyCode, LineItem, PartialRefund, PaymentOrder};
use crate::error::DomainError;

/// Smallest payment amount accepted, in minor units.
pub const MIN_PAYMENT_AMOUNT: i64 = 1000;

/// Longest accepted line-item name, in characters.
pub const MAX_LINE_ITEM_NAME_LEN: usize = 400;

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Line item as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub name: String,
    /// Unit amount in minor units
    pub amount: i64,
    pub quantity: u32,
}

/// Request to create a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// ISO-4217 code, e.g. "USD"
    pub currency: String,
    /// Total amount in minor units
    pub amount: i64,
    pub redirect_url: String,
    pub cancel_url: String,
    pub line_items: Vec<LineItemRequest>,
}

impl CreatePaymentRequest {
    /// Checks the request shape and converts it into the canonical order.
    ///
    /// The total is not compared with the line items.
    pub fn validate(self) -> Result<PaymentOrder, DomainError> {
        let currency: CurrencyCode = self.currency.parse()?;

        if self.amount < MIN_PAYMENT_AMOUNT {
            return Err(DomainError::ValidationError(format!(
                "amount must be at least {}",
                MIN_PAYMENT_AMOUNT
            )));
        }

        validate_url("redirectUrl", &self.redirect_url)?;
        validate_url("cancelUrl", &self.cancel_url)?;

        if self.line_items.is_empty() {
            return Err(DomainError::ValidationError(
                "at least one line item is required".into(),
            ));
        }

        let line_items = self
            .line_items
            .into_iter()
            .map(LineItemRequest::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaymentOrder {
            currency,
            amount: self.amount,
            redirect_url: self.redirect_url,
            cancel_url: self.cancel_url,
            line_items,
        })
    }
}

impl LineItemRequest {
    fn validate(self) -> Result<LineItem, DomainError> {
        let name_len = self.name.chars().count();
        if self.name.is_empty() || name_len > MAX_LINE_ITEM_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "line item name must be 1 to {} characters",
                MAX_LINE_ITEM_NAME_LEN
            )));
        }
        if self.amount <= 0 {
            return Err(DomainError::ValidationError(
                "line item amount must be positive".into(),
            ));
        }
        if self.quantity == 0 {
            return Err(DomainError::ValidationError(
                "line item quantity must be at least 1".into(),
            ));
        }

        Ok(LineItem {
            name: self.name,
            amount: self.amount,
            quantity: self.quantity,
        })
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), DomainError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(DomainError::ValidationError(format!(
            "{} must be an absolute http(s) URL",
            field
        ))),
    }
}

/// Request to refund part or all of a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Amount to refund in minor units
    pub amount: i64,
}

impl RefundRequest {
    pub fn validate(self) -> Result<PartialRefund, DomainError> {
        if self.amount <= 0 {
            return Err(DomainError::ValidationError(
                "refund amount must be positive".into(),
            ));
        }
        Ok(PartialRefund {
            amount: self.amount,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// `{"data": ...}` wrapper used by the create and refund endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
