//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use payments_gateways::{GatewayKind, paypal, stripe};
use payments_types::{DEFAULT_GATEWAY_TIMEOUT, GatewayMode, PaymentSettings};

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider: GatewayKind,
    pub gateway_timeout: Duration,
    pub paypal: PayPalConfig,
    pub stripe: StripeConfig,
}

#[derive(Debug, Default)]
pub struct PayPalConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Unset means sandbox.
    pub mode: GatewayMode,
    pub base_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct StripeConfig {
    pub token: String,
    pub base_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let provider = var("PAYMENT_PROVIDER")
            .unwrap_or_else(|| "paypal".to_string())
            .parse()?;

        let gateway_timeout = match var("GATEWAY_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("GATEWAY_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_GATEWAY_TIMEOUT,
        };

        let paypal = PayPalConfig {
            client_id: var("PAYPAL_CLIENT_ID").unwrap_or_default(),
            client_secret: var("PAYPAL_CLIENT_SECRET").unwrap_or_default(),
            mode: var("PAYPAL_MODE")
                .map(|mode| GatewayMode::from_env_value(&mode))
                .unwrap_or_default(),
            base_url: var("PAYPAL_BASE_URL"),
        };

        let stripe = StripeConfig {
            token: var("STRIPE_TOKEN").unwrap_or_default(),
            base_url: var("STRIPE_BASE_URL"),
        };

        Ok(Self {
            host,
            port,
            provider,
            gateway_timeout,
            paypal,
            stripe,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the selected provider only.
    pub fn gateway_settings(&self) -> PaymentSettings {
        let (settings, base_url) = match self.provider {
            GatewayKind::PayPal => (
                PaymentSettings::new(self.paypal.mode)
                    .with_credential(paypal::CLIENT_ID, &self.paypal.client_id)
                    .with_credential(paypal::CLIENT_SECRET, &self.paypal.client_secret),
                self.paypal.base_url.as_deref(),
            ),
            GatewayKind::Stripe => (
                PaymentSettings::new(GatewayMode::Production)
                    .with_credential(stripe::API_KEY, &self.stripe.token),
                self.stripe.base_url.as_deref(),
            ),
        };

        let settings = settings.with_timeout(self.gateway_timeout);
        match base_url {
            Some(url) => settings.with_base_url(url),
            None => settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.provider, GatewayKind::PayPal);
        assert_eq!(config.gateway_timeout, DEFAULT_GATEWAY_TIMEOUT);
        assert_eq!(config.paypal.mode, GatewayMode::Sandbox);
    }

    #[test]
    fn test_paypal_settings() {
        let config = load(&[
            ("PAYPAL_CLIENT_ID", "id"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
            ("PAYPAL_MODE", "LIVE"),
            ("GATEWAY_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        let settings = config.gateway_settings();

        assert_eq!(settings.mode, GatewayMode::Production);
        assert_eq!(settings.credential(paypal::CLIENT_ID), "id");
        assert_eq!(settings.credential(paypal::CLIENT_SECRET), "secret");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(settings.base_url.is_none());
    }

    #[test]
    fn test_stripe_settings() {
        let config = load(&[
            ("PAYMENT_PROVIDER", "Stripe"),
            ("STRIPE_TOKEN", "sk_test_1"),
            ("STRIPE_BASE_URL", "http://localhost:12111/v1"),
        ])
        .unwrap();

        let settings = config.gateway_settings();

        assert_eq!(config.provider, GatewayKind::Stripe);
        assert_eq!(settings.credential(stripe::API_KEY), "sk_test_1");
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:12111/v1"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("PAYMENT_PROVIDER", "adyen")]).is_err());
        assert!(load(&[("GATEWAY_TIMEOUT_SECS", "-1")]).is_err());
    }
}
