//! Domain models for the payment orchestration service.

pub mod currency;
pub mod payment;
pub mod settings;

pub use currency::CurrencyCode;
pub use payment::{
    LineItem, NewPayment, PartialRefund, Payment, PaymentDetail, PaymentId, PaymentOrder,
    PaymentStatus, RefundResponse,
};
pub use settings::{DEFAULT_GATEWAY_TIMEOUT, GatewayMode, PaymentSettings};
