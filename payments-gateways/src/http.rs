//! Transport helpers shared by the provider adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use payments_types::GatewayError;

/// Builds a client whose requests fail instead of hanging past `timeout`.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(transport_error)
}

pub(crate) fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

/// Picks the override when present, dropping any trailing slash.
pub(crate) fn resolve_base_url(override_url: Option<&str>, default_url: &str) -> String {
    override_url
        .unwrap_or(default_url)
        .trim_end_matches('/')
        .to_string()
}

/// A fully buffered provider response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub async fn read(response: reqwest::Response) -> Result<Self, GatewayError> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        Ok(Self { status, body })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        serde_json::from_str(&self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    pub fn into_request_error(self) -> GatewayError {
        GatewayError::Request {
            status: self.status.as_u16(),
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_url_prefers_override() {
        assert_eq!(
            resolve_base_url(Some("http://127.0.0.1:9000/"), "https://api.example.com"),
            "http://127.0.0.1:9000"
        );
        assert_eq!(
            resolve_base_url(None, "https://api.example.com"),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_decode_failure_is_decode_error() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: "not json".into(),
        };
        let result: Result<serde_json::Value, _> = raw.decode();
        assert!(matches!(result, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn test_request_error_keeps_status_and_body() {
        let raw = RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: "{\"name\":\"INVALID_REQUEST\"}".into(),
        };
        assert_eq!(
            raw.into_request_error(),
            GatewayError::Request {
                status: 400,
                body: "{\"name\":\"INVALID_REQUEST\"}".into()
            }
        );
    }
}
