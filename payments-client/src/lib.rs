//! # Payments Client SDK
//!
//! A typed Rust client for the payment processor API.

use payments_types::{
    CreatePaymentRequest, DataResponse, Payment, PaymentDetail, PaymentId, RefundRequest,
    RefundResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payment processor API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a payment and returns the gateway's redirect details.
    pub async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<PaymentDetail, ClientError> {
        let resp: DataResponse<PaymentDetail> = self.post("/api/v1/processor/payment", req).await?;
        Ok(resp.data)
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, ClientError> {
        self.get(&format!("/api/v1/processor/payment/{}", id)).await
    }

    /// Captures a payment the buyer has approved.
    pub async fn capture_payment(&self, id: PaymentId) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .post(
                &format!("/api/v1/processor/payment/{}/capture", id),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    /// Refunds `amount` minor units of a payment.
    pub async fn refund_payment(
        &self,
        id: PaymentId,
        amount: i64,
    ) -> Result<RefundResponse, ClientError> {
        let req = RefundRequest { amount };
        let resp: DataResponse<RefundResponse> = self
            .post(&format!("/api/v1/processor/payment/{}/refund", id), &req)
            .await?;
        Ok(resp.data)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
