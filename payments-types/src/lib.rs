//! # Payments Types
//!
//! Domain types and port traits for the payment orchestration service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Payment, LineItem, PaymentSettings)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Gateway, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CurrencyCode, DEFAULT_GATEWAY_TIMEOUT, GatewayMode, LineItem, NewPayment, PartialRefund,
    Payment, PaymentDetail, PaymentId, PaymentOrder, PaymentSettings, PaymentStatus,
    RefundResponse,
};
pub use dto::*;
pub use error::{AppError, DomainError, GatewayError, RepoError};
pub use ports::{GatewayConnector, PaymentRepository};
