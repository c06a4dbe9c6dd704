//! # Payments Hex
//!
//! Orchestration service and HTTP adapter for the payment processor.
//!
//! ## Architecture
//!
//! - `service/` - Application service (coordinates gateway and record store)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: PaymentRepository` and
//! `G: GatewayConnector`, so both adapters are injected at compile time.

pub mod inbound;
pub mod service;


pub use service::PaymentService;
