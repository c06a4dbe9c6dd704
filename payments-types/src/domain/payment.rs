//! Payment domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::CurrencyCode;

/// Externally visible identifier of a payment record, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status of a payment record.
///
/// No transition is guarded: capture and refund overwrite whatever status
/// the record currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Captured,
    Refund,
}

impl AsRef<str> for PaymentStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Captured => "captured",
            Self::Refund => "refund",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// A single purchased item. Amount is in minor units per unit of quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: i64,
    pub quantity: u32,
}

/// Refund confirmation returned by a gateway.
///
/// `amount` is provider dependent: Stripe reports the refunded minor units,
/// PayPal reports the capture's currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResponse {
    pub id: String,
    pub amount: String,
}

/// Amount to refund, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRefund {
    pub amount: i64,
}

/// Outcome of creating an order at a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    /// Store id. `None` until the orchestration layer has persisted the record.
    pub id: Option<PaymentId>,
    pub private_id: String,
    pub redirect_url: String,
    pub status: PaymentStatus,
}

/// Canonical payment handed to a gateway connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub currency: CurrencyCode,
    pub amount: i64,
    pub redirect_url: String,
    pub cancel_url: String,
    pub line_items: Vec<LineItem>,
}

/// A payment record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub currency: CurrencyCode,
    pub amount: i64,
    pub status: PaymentStatus,
    pub redirect_url: String,
    pub cancel_url: String,
    pub private_id: String,
    pub line_items: Vec<LineItem>,
}

impl NewPayment {
    /// Builds the record for an order the gateway has just accepted.
    pub fn created(order: PaymentOrder, private_id: String) -> Self {
        Self {
            currency: order.currency,
            amount: order.amount,
            status: PaymentStatus::Created,
            redirect_url: order.redirect_url,
            cancel_url: order.cancel_url,
            private_id,
            line_items: order.line_items,
        }
    }

    /// Attaches the store-assigned id. The refund list starts empty.
    pub fn with_id(self, id: PaymentId) -> Payment {
        Payment {
            id,
            currency: self.currency,
            amount: self.amount,
            status: self.status,
            redirect_url: self.redirect_url,
            cancel_url: self.cancel_url,
            private_id: self.private_id,
            line_items: self.line_items,
            refunds: Vec::new(),
        }
    }
}

/// The local record of a payment's lifecycle.
///
/// `amount` is not reconciled against the line items; it is kept exactly as
/// the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub currency: CurrencyCode,
    pub amount: i64,
    pub status: PaymentStatus,
    pub redirect_url: String,
    pub cancel_url: String,
    pub private_id: String,
    pub line_items: Vec<LineItem>,
    pub refunds: Vec<RefundResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> PaymentOrder {
        PaymentOrder {
            currency: "USD".parse().unwrap(),
            amount: 5000,
            redirect_url: "https://shop.test/ok".into(),
            cancel_url: "https://shop.test/cancel".into(),
            line_items: vec![LineItem {
                name: "Widget".into(),
                amount: 3000,
                quantity: 1,
            }],
        }
    }

    #[test]
    fn test_new_payment_starts_created() {
        let payment = NewPayment::created(order(), "O-1".into());
        assert_eq!(payment.status, PaymentStatus::Created);
        assert_eq!(payment.private_id, "O-1");
    }

    #[test]
    fn test_amount_is_not_reconciled_with_items() {
        let id = PaymentId::new();
        let payment = NewPayment::created(order(), "O-1".into()).with_id(id);
        assert_eq!(payment.id, id);
        assert_eq!(payment.amount, 5000);
        assert!(payment.refunds.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Refund).unwrap();
        assert_eq!(json, "\"refund\"");
    }

    #[test]
    fn test_payment_uses_camel_case_fields() {
        let payment = NewPayment::created(order(), "O-1".into()).with_id(PaymentId::new());
        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["privateId"], "O-1");
        assert_eq!(value["lineItems"][0]["name"], "Widget");
        assert_eq!(value["status"], "created");
    }

    #[test]
    fn test_payment_id_roundtrips_through_str() {
        let id = PaymentId::new();
        let parsed: PaymentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<PaymentId>().is_err());
    }
}
