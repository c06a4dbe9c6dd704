//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer. Request
//! validation happens here, before anything reaches the service.

mod handlers;
mod server;

pub use handlers::ApiError;
pub use server::HttpServer;
