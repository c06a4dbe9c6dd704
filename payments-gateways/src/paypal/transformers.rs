//! PayPal Orders v2 wire types and conversions from the canonical model.

use serde::{Deserialize, Serialize};

use payments_types::{PaymentOrder, RefundResponse};

/// Converts minor units to the major-unit string PayPal expects.
///
/// Assumes a two-decimal currency and truncates the fractional part
/// (`5099` becomes `"50"`). Not currency aware.
pub fn to_major_units(minor: i64) -> String {
    (minor / 100).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

impl Amount {
    fn from_minor(currency_code: &str, minor: i64) -> Self {
        Self {
            currency_code: currency_code.to_string(),
            value: to_major_units(minor),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Create order
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub unit_amount: Amount,
    pub quantity: String,
}

#[derive(Debug, Serialize)]
pub struct Breakdown {
    pub item_total: Amount,
}

#[derive(Debug, Serialize)]
pub struct PurchaseUnitAmount {
    pub currency_code: String,
    pub value: String,
    pub breakdown: Breakdown,
}

#[derive(Debug, Serialize)]
pub struct PurchaseUnit {
    pub amount: PurchaseUnitAmount,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub intent: &'static str,
    pub application_context: ApplicationContext,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl From<&PaymentOrder> for OrderRequest {
    fn from(order: &PaymentOrder) -> Self {
        let currency = order.currency.as_str();

        let items = order
            .line_items
            .iter()
            .map(|line| Item {
                name: line.name.clone(),
                description: String::new(),
                unit_amount: Amount::from_minor(currency, line.amount),
                quantity: line.quantity.to_string(),
            })
            .collect();

        Self {
            intent: "CAPTURE",
            application_context: ApplicationContext {
                return_url: order.redirect_url.clone(),
                cancel_url: order.cancel_url.clone(),
            },
            purchase_units: vec![PurchaseUnit {
                amount: PurchaseUnitAmount {
                    currency_code: currency.to_string(),
                    value: to_major_units(order.amount),
                    breakdown: Breakdown {
                        item_total: Amount::from_minor(currency, order.amount),
                    },
                },
                items,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderLink {
    pub href: String,
    pub rel: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    #[serde(default)]
    pub links: Vec<OrderLink>,
}

impl OrderResponse {
    /// The buyer approval link, or an empty string when PayPal sent none.
    pub fn approve_url(&self) -> String {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.clone())
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OAuth
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Order detail and refunds
// ─────────────────────────────────────────────────────────────────────────────

pub const CAPTURE_COMPLETED: &str = "COMPLETED";

#[derive(Debug, Deserialize)]
pub struct Capture {
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub amount: Amount,
}

#[derive(Debug, Default, Deserialize)]
pub struct Payments {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseUnitDetail {
    #[serde(default)]
    pub payments: Payments,
}

#[derive(Debug, Deserialize)]
pub struct OrderDetail {
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnitDetail>,
}

impl OrderDetail {
    /// First completed capture across all purchase units.
    pub fn completed_capture(&self) -> Option<&Capture> {
        self.purchase_units
            .iter()
            .flat_map(|unit| unit.payments.captures.iter())
            .find(|capture| capture.status == CAPTURE_COMPLETED)
    }
}

#[derive(Debug, Serialize)]
pub struct RefundRequest {
    pub amount: Amount,
}

impl RefundRequest {
    pub fn for_capture(capture: &Capture, minor: i64) -> Self {
        Self {
            amount: Amount::from_minor(&capture.amount.currency_code, minor),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefundDetail {
    pub id: String,
}

impl RefundDetail {
    /// The reported amount is the capture's currency code, not the refunded
    /// value; existing consumers read it that way.
    pub fn into_refund_response(self, capture: &Capture) -> RefundResponse {
        RefundResponse {
            id: self.id,
            amount: capture.amount.currency_code.clone(),
        }
    }
}
