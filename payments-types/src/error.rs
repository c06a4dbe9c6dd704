//! Error types for the payment orchestration service.

use crate::domain::PaymentId;

/// Domain-level errors (malformed input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid ISO-4217 currency code: {0}")]
    InvalidCurrency(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Errors raised by a gateway connector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Network or connection failure, including timeouts.
    #[error("Gateway transport error: {0}")]
    Transport(String),

    /// The provider answered with an unexpected status code.
    #[error("Gateway request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),

    /// The provider rejected the capture or the payment is not paid yet.
    #[error("Gateway capture error: {0}")]
    Capture(String),

    /// The remote order is not in a state that allows the operation.
    #[error("Gateway state error: {0}")]
    State(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The gateway refused to create the order. Nothing was persisted.
    #[error("error creating the payment")]
    Creation(#[source] GatewayError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn payment_not_found(id: PaymentId) -> Self {
        AppError::NotFound(format!("Payment {}", id))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Storage(e) => AppError::Internal(e),
        }
    }
}
