//! Stripe form payloads and response types.

use serde::Deserialize;

use payments_types::{PartialRefund, PaymentOrder, RefundResponse};

/// Status a payment intent reports once funds are collected.
pub const INTENT_SUCCEEDED: &str = "succeeded";
/// Payment status a checkout session reports once funds are collected.
pub const SESSION_PAID: &str = "paid";

/// Checkout session ids carry this prefix; payment intents use `pi_`.
const SESSION_PREFIX: &str = "cs_";

pub type Form = Vec<(String, String)>;

pub fn is_session_id(id: &str) -> bool {
    id.starts_with(SESSION_PREFIX)
}

/// Builds the form for `POST /checkout/sessions`.
pub fn checkout_session_form(order: &PaymentOrder) -> Form {
    let mut form = Form::new();

    for (index, item) in order.line_items.iter().enumerate() {
        form.push((format!("line_items[{}][amount]", index), item.amount.to_string()));
        form.push((
            format!("line_items[{}][currency]", index),
            order.currency.to_string(),
        ));
        form.push((format!("line_items[{}][name]", index), item.name.clone()));
        form.push((
            format!("line_items[{}][quantity]", index),
            item.quantity.to_string(),
        ));
    }

    form.push(("cancel_url".into(), order.cancel_url.clone()));
    form.push(("success_url".into(), order.redirect_url.clone()));
    form.push(("mode".into(), "payment".into()));
    form
}

/// Builds the form for `POST /refunds`.
pub fn refund_form(payment_intent: &str, refund: PartialRefund) -> Form {
    vec![
        ("payment_intent".into(), payment_intent.to_string()),
        ("amount".into(), refund.amount.to_string()),
    ]
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl CheckoutSession {
    /// Prefers the payment intent; falls back to the session id when Stripe
    /// has not attached one yet.
    pub fn private_id(&self) -> String {
        self.payment_intent
            .clone()
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some(SESSION_PAID)
    }
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
}

impl PaymentIntent {
    pub fn is_paid(&self) -> bool {
        self.status == INTENT_SUCCEEDED
    }
}

#[derive(Debug, Deserialize)]
pub struct Refund {
    pub id: String,
    pub amount: i64,
}

impl From<Refund> for RefundResponse {
    fn from(refund: Refund) -> Self {
        RefundResponse {
            id: refund.id,
            amount: refund.amount.to_string(),
        }
    }
}
