//! PayPal Orders v2 adapter.
//!
//! Authentication is a lazily acquired OAuth bearer token. Every call goes
//! through [`PayPalGateway::execute`], which sends with the cached token and,
//! on `401 Unauthorized`, exchanges client credentials for a fresh token and
//! replays the request exactly once.

pub mod transformers;

use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

use payments_types::{
    GatewayConnector, GatewayError, GatewayMode, PartialRefund, PaymentDetail, PaymentOrder,
    PaymentSettings, PaymentStatus, RefundResponse,
};

use crate::http::{RawResponse, build_client, resolve_base_url, transport_error};
use transformers::{
    OrderDetail, OrderRequest, OrderResponse, RefundDetail, RefundRequest, TokenResponse,
};

/// Credential key holding the OAuth client id.
pub const CLIENT_ID: &str = "client_id";
/// Credential key holding the OAuth client secret.
pub const CLIENT_SECRET: &str = "client_secret";

const PRODUCTION_URL: &str = "https://api.paypal.com";
const SANDBOX_URL: &str = "https://api.sandbox.paypal.com";

/// PayPal gateway connector.
pub struct PayPalGateway {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    /// Last token obtained; empty until the first 401 forces an exchange.
    bearer_token: RwLock<String>,
}

impl PayPalGateway {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// OAuth client-credentials exchange using HTTP Basic auth.
    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/oauth2/token"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(transport_error)?;

        let raw = RawResponse::read(response).await?;
        if raw.status != StatusCode::OK {
            error!(status = %raw.status, body = %raw.body, "Error getting the auth token");
            return Err(raw.into_request_error());
        }

        let token: TokenResponse = raw.decode()?;
        Ok(token.access_token)
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        body: Option<&[u8]>,
        token: &str,
    ) -> Result<RawResponse, GatewayError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token);

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(transport_error)?;
        RawResponse::read(response).await
    }

    /// Sends an authenticated request, refreshing the token once on 401.
    ///
    /// `body` is buffered by the caller so the retry resends identical bytes.
    /// The retry uses the token this call obtained, even if a concurrent
    /// caller has replaced the cached one in the meantime. Whatever the
    /// second response is, it is returned as-is.
    #[instrument(skip(self, body))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, GatewayError> {
        let url = self.url(path);
        let token = self.bearer_token.read().await.clone();

        let first = self.send_once(&method, &url, body.as_deref(), &token).await?;
        if first.status != StatusCode::UNAUTHORIZED {
            return Ok(first);
        }

        debug!("Bearer token rejected, requesting a new one");
        let token = self.fetch_token().await?;
        *self.bearer_token.write().await = token.clone();

        self.send_once(&method, &url, body.as_deref(), &token).await
    }

    async fn execute_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        payload: &T,
    ) -> Result<RawResponse, GatewayError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| GatewayError::Decode(format!("encoding request body: {}", e)))?;
        self.execute(method, path, Some(body)).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: &str) -> Result<OrderDetail, GatewayError> {
        let raw = self
            .execute(Method::GET, &format!("/v2/checkout/orders/{}", order_id), None)
            .await?;

        if !raw.status.is_success() {
            warn!(status = %raw.status, "Order querying failed");
            return Err(raw.into_request_error());
        }

        raw.decode()
    }
}

#[async_trait::async_trait]
impl GatewayConnector for PayPalGateway {
    fn init(settings: PaymentSettings) -> Result<Self, GatewayError> {
        let default_url = match settings.mode {
            GatewayMode::Sandbox => SANDBOX_URL,
            GatewayMode::Production => PRODUCTION_URL,
        };

        let client_id = settings.credential(CLIENT_ID).to_string();
        let client_secret = settings.credential(CLIENT_SECRET).to_string();
        if client_id.is_empty() || client_secret.is_empty() {
            warn!("PayPal credentials are incomplete; token exchange will be rejected");
        }

        Ok(Self {
            client: build_client(settings.timeout)?,
            base_url: resolve_base_url(settings.base_url.as_deref(), default_url),
            client_id,
            client_secret,
            bearer_token: RwLock::new(String::new()),
        })
    }

    fn name(&self) -> &'static str {
        "paypal"
    }

    #[instrument(skip(self, order), fields(amount = order.amount, currency = %order.currency))]
    async fn create_order(&self, order: &PaymentOrder) -> Result<PaymentDetail, GatewayError> {
        let request = OrderRequest::from(order);
        let raw = self
            .execute_json(Method::POST, "/v2/checkout/orders", &request)
            .await?;

        if raw.status != StatusCode::CREATED {
            error!(status = %raw.status, body = %raw.body, "PayPal order creation error");
            return Err(raw.into_request_error());
        }

        let created: OrderResponse = raw.decode()?;
        Ok(PaymentDetail {
            id: None,
            redirect_url: created.approve_url(),
            private_id: created.id,
            status: PaymentStatus::Created,
        })
    }

    #[instrument(skip(self))]
    async fn capture_order(&self, private_id: &str) -> Result<bool, GatewayError> {
        let raw = self
            .execute(
                Method::POST,
                &format!("/v2/checkout/orders/{}/capture", private_id),
                None,
            )
            .await?;

        // PayPal answers a successful capture with 201.
        if raw.status != StatusCode::CREATED {
            error!(status = %raw.status, body = %raw.body, "Error capturing the order");
            return Err(GatewayError::Capture(format!(
                "capture rejected with status {}: {}",
                raw.status.as_u16(),
                raw.body
            )));
        }

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn refund_order(
        &self,
        private_id: &str,
        refund: PartialRefund,
    ) -> Result<RefundResponse, GatewayError> {
        let detail = self.get_order(private_id).await?;

        if detail.purchase_units.is_empty() {
            return Err(GatewayError::State("order has no purchase units".into()));
        }
        let capture = detail
            .completed_capture()
            .ok_or_else(|| GatewayError::State("order not captured yet".into()))?;

        let payload = RefundRequest::for_capture(capture, refund.amount);
        let raw = self
            .execute_json(
                Method::POST,
                &format!("/v2/payments/captures/{}/refund", capture.id),
                &payload,
            )
            .await?;

        if raw.status != StatusCode::CREATED {
            error!(status = %raw.status, body = %raw.body, "Error refunding order");
            return Err(raw.into_request_error());
        }

        let refunded: RefundDetail = raw.decode()?;
        Ok(refunded.into_refund_response(capture))
    }
}
