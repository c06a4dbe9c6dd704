//! Stripe Checkout adapter.
//!
//! Stripe checkout is single-step: funds are collected when the buyer pays
//! the session, so "capture" only verifies that the payment went through.

pub mod transformers;

use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use tracing::{error, instrument, warn};

use payments_types::{
    GatewayConnector, GatewayError, PartialRefund, PaymentDetail, PaymentOrder, PaymentSettings,
    PaymentStatus, RefundResponse,
};

use crate::http::{RawResponse, build_client, resolve_base_url, transport_error};
use transformers::{
    CheckoutSession, Form, PaymentIntent, Refund, checkout_session_form, is_session_id,
    refund_form,
};

/// Credential key holding the secret API key.
pub const API_KEY: &str = "api_key";

const BASE_URL: &str = "https://api.stripe.com/v1";

/// Stripe gateway connector. Authenticates with a static bearer key.
pub struct StripeGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StripeGateway {
    #[instrument(skip(self, form))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        form: Option<Form>,
    ) -> Result<RawResponse, GatewayError> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .bearer_auth(&self.api_key);

        if let Some(form) = form {
            request = request.form(&form);
        }

        let response = request.send().await.map_err(transport_error)?;
        RawResponse::read(response).await
    }

    async fn get_session(&self, session_id: &str) -> Result<RawResponse, GatewayError> {
        self.send(
            Method::GET,
            &format!("/checkout/sessions/{}", session_id),
            None,
        )
        .await
    }

    async fn get_payment_intent(&self, intent_id: &str) -> Result<RawResponse, GatewayError> {
        self.send(Method::GET, &format!("/payment_intents/{}", intent_id), None)
            .await
    }

    /// Reports whether the session or intent behind `private_id` is paid.
    async fn is_paid(&self, private_id: &str) -> Result<bool, GatewayError> {
        let raw = if is_session_id(private_id) {
            self.get_session(private_id).await?
        } else {
            self.get_payment_intent(private_id).await?
        };

        if raw.status != StatusCode::OK {
            warn!(status = %raw.status, body = %raw.body, "Error getting payment status");
            return Err(GatewayError::Capture(format!(
                "payment lookup failed with status {}",
                raw.status.as_u16()
            )));
        }

        if is_session_id(private_id) {
            Ok(raw.decode::<CheckoutSession>()?.is_paid())
        } else {
            Ok(raw.decode::<PaymentIntent>()?.is_paid())
        }
    }

    /// Refunds need a payment intent; session ids are resolved through the session.
    async fn resolve_payment_intent(&self, private_id: &str) -> Result<String, GatewayError> {
        if !is_session_id(private_id) {
            return Ok(private_id.to_string());
        }

        let raw = self.get_session(private_id).await?;
        if raw.status != StatusCode::OK {
            return Err(raw.into_request_error());
        }

        raw.decode::<CheckoutSession>()?
            .payment_intent
            .ok_or_else(|| GatewayError::State("checkout session has no payment intent".into()))
    }
}

#[async_trait::async_trait]
impl GatewayConnector for StripeGateway {
    fn init(settings: PaymentSettings) -> Result<Self, GatewayError> {
        let api_key = settings.credential(API_KEY).to_string();
        if api_key.is_empty() {
            warn!("Stripe API key is missing; requests will be rejected");
        }

        Ok(Self {
            client: build_client(settings.timeout)?,
            base_url: resolve_base_url(settings.base_url.as_deref(), BASE_URL),
            api_key,
        })
    }

    fn name(&self) -> &'static str {
        "stripe"
    }

    #[instrument(skip(self, order), fields(amount = order.amount, currency = %order.currency))]
    async fn create_order(&self, order: &PaymentOrder) -> Result<PaymentDetail, GatewayError> {
        let raw = self
            .send(
                Method::POST,
                "/checkout/sessions",
                Some(checkout_session_form(order)),
            )
            .await?;

        if raw.status != StatusCode::OK {
            warn!(status = %raw.status, body = %raw.body, "Checkout session request failed");
            return Err(raw.into_request_error());
        }

        let session: CheckoutSession = raw.decode()?;
        Ok(PaymentDetail {
            id: None,
            private_id: session.private_id(),
            redirect_url: session.url.unwrap_or_default(),
            status: PaymentStatus::Created,
        })
    }

    #[instrument(skip(self))]
    async fn capture_order(&self, private_id: &str) -> Result<bool, GatewayError> {
        if !self.is_paid(private_id).await? {
            return Err(GatewayError::Capture("payment intent is not paid".into()));
        }
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn refund_order(
        &self,
        private_id: &str,
        refund: PartialRefund,
    ) -> Result<RefundResponse, GatewayError> {
        let payment_intent = self.resolve_payment_intent(private_id).await?;

        let raw = self
            .send(
                Method::POST,
                "/refunds",
                Some(refund_form(&payment_intent, refund)),
            )
            .await?;

        if raw.status != StatusCode::OK {
            error!(status = %raw.status, body = %raw.body, "Refund request failed");
            return Err(raw.into_request_error());
        }

        Ok(raw.decode::<Refund>()?.into())
    }
}
