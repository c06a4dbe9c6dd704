//! # Payments Gateways
//!
//! Outbound adapters that implement the `GatewayConnector` port for each
//! supported payment provider.
//!
//! - `paypal` - Orders v2 API, OAuth bearer token with one refresh-and-retry
//! - `stripe` - Checkout Sessions API, static bearer key
//!
//! Exactly one provider is active per process. [`Gateway`] wraps whichever
//! adapter the configuration selected so the service can stay generic over a
//! single concrete connector type.

mod http;
pub mod paypal;
pub mod stripe;

use async_trait::async_trait;
use payments_types::{
    GatewayConnector, GatewayError, PartialRefund, PaymentDetail, PaymentOrder, PaymentSettings,
    RefundResponse,
};

pub use paypal::PayPalGateway;
pub use stripe::StripeGateway;

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    PayPal,
    Stripe,
}

/// Error for an unrecognized provider name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment provider: {0} (expected paypal or stripe)")]
pub struct UnknownGateway(pub String);

impl std::str::FromStr for GatewayKind {
    type Err = UnknownGateway;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paypal" => Ok(Self::PayPal),
            "stripe" => Ok(Self::Stripe),
            _ => Err(UnknownGateway(s.to_string())),
        }
    }
}

/// The connector selected at startup.
///
/// Build it with [`build_gateway`]. The port's `init` only receives
/// settings, so `Gateway::init` always yields the PayPal adapter.
pub enum Gateway {
    PayPal(PayPalGateway),
    Stripe(StripeGateway),
}

/// Initializes the connector for `kind`.
///
/// # Examples
///
/// ```ignore
/// let settings = PaymentSettings::new(GatewayMode::Sandbox)
///     .with_credential(paypal::CLIENT_ID, "id")
///     .with_credential(paypal::CLIENT_SECRET, "secret");
/// let gateway = build_gateway(GatewayKind::PayPal, settings)?;
/// ```
pub fn build_gateway(kind: GatewayKind, settings: PaymentSettings) -> Result<Gateway, GatewayError> {
    match kind {
        GatewayKind::PayPal => PayPalGateway::init(settings).map(Gateway::PayPal),
        GatewayKind::Stripe => StripeGateway::init(settings).map(Gateway::Stripe),
    }
}

impl Gateway {
    fn inner(&self) -> &dyn GatewayConnector {
        match self {
            Gateway::PayPal(gateway) => gateway,
            Gateway::Stripe(gateway) => gateway,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement GatewayConnector for Gateway (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl GatewayConnector for Gateway {
    /// Builds the PayPal adapter. Stripe is only reachable via [`build_gateway`].
    fn init(settings: PaymentSettings) -> Result<Self, GatewayError> {
        build_gateway(GatewayKind::PayPal, settings)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    async fn create_order(&self, order: &PaymentOrder) -> Result<PaymentDetail, GatewayError> {
        self.inner().create_order(order).await
    }

    async fn capture_order(&self, private_id: &str) -> Result<bool, GatewayError> {
        self.inner().capture_order(private_id).await
    }

    async fn refund_order(
        &self,
        private_id: &str,
        refund: PartialRefund,
    ) -> Result<RefundResponse, GatewayError> {
        self.inner().refund_order(private_id, refund).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payments_types::GatewayMode;

    #[test]
    fn test_parse_gateway_kind() {
        assert_eq!("PayPal".parse::<GatewayKind>(), Ok(GatewayKind::PayPal));
        assert_eq!("stripe".parse::<GatewayKind>(), Ok(GatewayKind::Stripe));
        assert!("adyen".parse::<GatewayKind>().is_err());
    }

    #[test]
    fn test_unknown_gateway_message() {
        let err = "adyen".parse::<GatewayKind>().unwrap_err();
        assert_eq!(err, UnknownGateway("adyen".into()));
        assert_eq!(
            err.to_string(),
            "Unknown payment provider: adyen (expected paypal or stripe)"
        );
    }

    #[test]
    fn test_build_gateway_selects_provider() {
        let settings = PaymentSettings::new(GatewayMode::Sandbox);
        let gateway = build_gateway(GatewayKind::Stripe, settings.clone()).unwrap();
        assert_eq!(gateway.name(), "stripe");

        let gateway = build_gateway(GatewayKind::PayPal, settings).unwrap();
        assert_eq!(gateway.name(), "paypal");
    }

    #[test]
    fn test_trait_init_builds_paypal() {
        let gateway = Gateway::init(PaymentSettings::new(GatewayMode::Sandbox)).unwrap();
        assert!(matches!(gateway, Gateway::PayPal(_)));
        assert_eq!(gateway.name(), "paypal");
    }
}
