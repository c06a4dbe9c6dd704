//! Gateway connector port.
//!
//! Each payment provider (PayPal, Stripe, ...) implements this trait.
//! The orchestration service only ever talks to a gateway through it.

use crate::domain::{PartialRefund, PaymentDetail, PaymentOrder, PaymentSettings, RefundResponse};
use crate::error::GatewayError;

/// Provider-agnostic contract for creating, capturing and refunding orders.
#[async_trait::async_trait]
pub trait GatewayConnector: Send + Sync + 'static {
    /// Configures endpoint, credentials and transport from the settings.
    ///
    /// Missing credentials are not rejected here; the provider will refuse
    /// the first call instead.
    fn init(settings: PaymentSettings) -> Result<Self, GatewayError>
    where
        Self: Sized;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Submits the order and returns the provider's private id and redirect URL.
    async fn create_order(&self, order: &PaymentOrder) -> Result<PaymentDetail, GatewayError>;

    /// Finalizes a previously created order.
    async fn capture_order(&self, private_id: &str) -> Result<bool, GatewayError>;

    /// Refunds part or all of a captured order.
    async fn refund_order(
        &self,
        private_id: &str,
        refund: PartialRefund,
    ) -> Result<RefundResponse, GatewayError>;
}
